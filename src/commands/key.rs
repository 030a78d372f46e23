//! Key commands (DEL, EXISTS)

use super::{wrong_arity, Command, CommandContext};
use crate::protocol::RespValue;
use bytes::Bytes;

/// DEL command - Delete a key
///
/// Syntax: DEL key
///
/// Replies :1 if the key was removed, :0 if it was absent.
pub struct DelCommand;

impl Command for DelCommand {
    fn execute(&self, ctx: &CommandContext, args: &[Bytes]) -> RespValue {
        let [key] = args else {
            return wrong_arity(self.name());
        };

        RespValue::boolean(ctx.store.del(key))
    }

    fn name(&self) -> &'static str {
        "DEL"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// EXISTS command - Check if a key exists
///
/// Syntax: EXISTS key
pub struct ExistsCommand;

impl Command for ExistsCommand {
    fn execute(&self, ctx: &CommandContext, args: &[Bytes]) -> RespValue {
        let [key] = args else {
            return wrong_arity(self.name());
        };

        RespValue::boolean(ctx.store.exists(key))
    }

    fn name(&self) -> &'static str {
        "EXISTS"
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
