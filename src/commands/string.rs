//! String commands (SET, GET)

use super::{wrong_arity, Command, CommandContext};
use crate::protocol::RespValue;
use bytes::Bytes;

/// SET command - Set a key to a value
///
/// Syntax: SET key value
pub struct SetCommand;

impl Command for SetCommand {
    fn execute(&self, ctx: &CommandContext, args: &[Bytes]) -> RespValue {
        let [key, value] = args else {
            return wrong_arity(self.name());
        };

        ctx.store.set(key.clone(), value.clone());

        RespValue::ok()
    }

    fn name(&self) -> &'static str {
        "SET"
    }

    fn min_args(&self) -> usize {
        2
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }
}

/// GET command - Get the value of a key
///
/// Syntax: GET key
///
/// A missing key is answered with the null bulk string.
pub struct GetCommand;

impl Command for GetCommand {
    fn execute(&self, ctx: &CommandContext, args: &[Bytes]) -> RespValue {
        let [key] = args else {
            return wrong_arity(self.name());
        };

        match ctx.store.get(key) {
            Some(value) => RespValue::BulkString(value),
            None => RespValue::null(),
        }
    }

    fn name(&self) -> &'static str {
        "GET"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
