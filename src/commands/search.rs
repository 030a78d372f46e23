//! Search commands (KEYS, SCAN)

use super::{parse_usize, syntax_error, wrong_arity, Command, CommandContext};
use crate::protocol::RespValue;
use crate::store::ScanOptions;
use bytes::Bytes;

/// Page size used when SCAN is called without COUNT
const DEFAULT_SCAN_COUNT: usize = 10;

/// KEYS command - List every key
///
/// Syntax: KEYS *
///
/// Only the match-all pattern is accepted.
pub struct KeysCommand;

impl Command for KeysCommand {
    fn execute(&self, ctx: &CommandContext, args: &[Bytes]) -> RespValue {
        let [pattern] = args else {
            return wrong_arity(self.name());
        };

        if &pattern[..] != b"*" {
            return syntax_error();
        }

        RespValue::bulk_array(ctx.store.keys())
    }

    fn name(&self) -> &'static str {
        "KEYS"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// SCAN command - Incrementally iterate the key space
///
/// Syntax: SCAN cursor [MATCH pattern] [COUNT n] [TYPE type]
///
/// Replies with a two element array: the next cursor as a bulk string
/// ("0" once the iteration is complete) and the keys found on this page.
pub struct ScanCommand;

impl ScanCommand {
    /// Parse the option pairs following the cursor
    fn parse_options(args: &[Bytes]) -> Result<ScanOptions, RespValue> {
        let mut options = ScanOptions::all().with_count(DEFAULT_SCAN_COUNT);

        for pair in args.chunks(2) {
            let [option, value] = pair else {
                return Err(syntax_error());
            };

            match option.to_ascii_lowercase().as_slice() {
                b"count" => {
                    options.count = parse_usize(value)
                        .ok_or_else(|| RespValue::error("ERR invalid count"))?;
                }
                b"match" => {
                    options.pattern = value.clone();
                }
                b"type" => {
                    options.key_type = String::from_utf8_lossy(value).to_lowercase();
                }
                _ => return Err(syntax_error()),
            }
        }

        Ok(options)
    }
}

impl Command for ScanCommand {
    fn execute(&self, ctx: &CommandContext, args: &[Bytes]) -> RespValue {
        let Some((cursor, rest)) = args.split_first() else {
            return wrong_arity(self.name());
        };

        let Some(cursor) = parse_usize(cursor) else {
            return RespValue::error("ERR invalid cursor");
        };

        let options = match Self::parse_options(rest) {
            Ok(options) => options,
            Err(reply) => return reply,
        };

        let page = ctx.store.scan(cursor, &options);

        RespValue::array(vec![
            RespValue::bulk_string(page.cursor.to_string()),
            RespValue::bulk_array(page.keys),
        ])
    }

    fn name(&self) -> &'static str {
        "SCAN"
    }

    fn min_args(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn args(parts: &[&'static str]) -> Vec<Bytes> {
        parts.iter().map(|p| Bytes::from(*p)).collect()
    }

    fn context_with(keys: &[&str]) -> CommandContext {
        let ctx = CommandContext::in_memory();
        for key in keys {
            ctx.store.set(Bytes::from(key.to_string()), Bytes::from("v"));
        }
        ctx
    }

    /// Split a SCAN reply into (cursor, keys)
    fn unpack(reply: RespValue) -> (String, Vec<Bytes>) {
        let mut parts = match reply {
            RespValue::Array(parts) => parts,
            other => panic!("Expected array response, got {:?}", other),
        };
        assert_eq!(parts.len(), 2);
        let keys = match parts.pop() {
            Some(RespValue::Array(keys)) => keys
                .into_iter()
                .map(|k| match k {
                    RespValue::BulkString(b) => b,
                    other => panic!("Expected bulk string, got {:?}", other),
                })
                .collect(),
            other => panic!("Expected key array, got {:?}", other),
        };
        let cursor = match parts.pop() {
            Some(RespValue::BulkString(b)) => String::from_utf8(b.to_vec()).unwrap(),
            other => panic!("Expected cursor bulk string, got {:?}", other),
        };
        (cursor, keys)
    }

    #[test]
    fn test_keys_all() {
        let ctx = context_with(&["key1", "key2", "name"]);

        if let RespValue::Array(keys) = KeysCommand.execute(&ctx, &args(&["*"])) {
            assert_eq!(keys.len(), 3);
        } else {
            panic!("Expected array response");
        }
    }

    #[test]
    fn test_keys_empty_store() {
        let ctx = CommandContext::in_memory();

        assert_eq!(KeysCommand.execute(&ctx, &args(&["*"])), RespValue::array(vec![]));
    }

    #[test]
    fn test_keys_rejects_other_patterns() {
        let ctx = context_with(&["user:1"]);

        assert_eq!(
            KeysCommand.execute(&ctx, &args(&["user:*"])),
            RespValue::error("ERR syntax error")
        );
        assert_eq!(
            KeysCommand.execute(&ctx, &args(&["*", "*"])),
            RespValue::error("ERR wrong number of arguments for 'keys' command")
        );
    }

    #[test]
    fn test_scan_full_iteration() {
        let names: Vec<String> = (0..25).map(|i| format!("key{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let ctx = context_with(&refs);

        let mut seen = HashSet::new();
        let mut cursor = "0".to_string();
        loop {
            let reply = ScanCommand.execute(&ctx, &[Bytes::from(cursor.clone())]);
            let (next, keys) = unpack(reply);
            assert!(keys.len() <= DEFAULT_SCAN_COUNT);
            seen.extend(keys);
            if next == "0" {
                break;
            }
            cursor = next;
        }

        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn test_scan_match_and_count() {
        let ctx = context_with(&["user:1", "user:2", "session:1"]);

        let reply = ScanCommand.execute(&ctx, &args(&["0", "MATCH", "user:*", "COUNT", "100"]));
        let (cursor, keys) = unpack(reply);

        assert_eq!(cursor, "0");
        let keys: HashSet<Bytes> = keys.into_iter().collect();
        assert_eq!(keys, HashSet::from([Bytes::from("user:1"), Bytes::from("user:2")]));
    }

    #[test]
    fn test_scan_type_filter() {
        let ctx = context_with(&["a", "b"]);

        let (_, keys) = unpack(ScanCommand.execute(&ctx, &args(&["0", "type", "STRING"])));
        assert_eq!(keys.len(), 2);

        let (cursor, keys) = unpack(ScanCommand.execute(&ctx, &args(&["0", "TYPE", "list"])));
        assert_eq!(cursor, "0");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_scan_cursor_past_end() {
        let ctx = context_with(&["a", "b"]);

        let (cursor, keys) = unpack(ScanCommand.execute(&ctx, &args(&["2"])));
        assert_eq!(cursor, "0");
        assert!(keys.is_empty());
    }

    #[test]
    fn test_scan_reply_encoding() {
        let ctx = context_with(&["only"]);
        let reply = ScanCommand.execute(&ctx, &args(&["0"]));

        assert_eq!(
            reply,
            RespValue::array(vec![
                RespValue::bulk_string("0"),
                RespValue::array(vec![RespValue::bulk_string("only")]),
            ])
        );
    }

    #[test]
    fn test_scan_errors() {
        let ctx = CommandContext::in_memory();

        assert_eq!(
            ScanCommand.execute(&ctx, &args(&["abc"])),
            RespValue::error("ERR invalid cursor")
        );
        assert_eq!(
            ScanCommand.execute(&ctx, &args(&["-1"])),
            RespValue::error("ERR invalid cursor")
        );
        assert_eq!(
            ScanCommand.execute(&ctx, &args(&["0", "COUNT", "x"])),
            RespValue::error("ERR invalid count")
        );
        assert_eq!(
            ScanCommand.execute(&ctx, &args(&["0", "MATCH"])),
            RespValue::error("ERR syntax error")
        );
        assert_eq!(
            ScanCommand.execute(&ctx, &args(&["0", "LIMIT", "5"])),
            RespValue::error("ERR syntax error")
        );
        assert_eq!(
            ScanCommand.execute(&ctx, &[]),
            RespValue::error("ERR wrong number of arguments for 'scan' command")
        );
    }
}
