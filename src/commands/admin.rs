//! Connection commands (PING)

use super::{Command, CommandContext};
use crate::protocol::RespValue;
use bytes::Bytes;

/// PING command - Liveness check
///
/// Syntax: PING
///
/// Extra arguments are ignored.
pub struct PingCommand;

impl Command for PingCommand {
    fn execute(&self, _ctx: &CommandContext, _args: &[Bytes]) -> RespValue {
        RespValue::simple_string("PONG")
    }

    fn name(&self) -> &'static str {
        "PING"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping() {
        let ctx = CommandContext::in_memory();

        assert_eq!(PingCommand.execute(&ctx, &[]), RespValue::simple_string("PONG"));
        assert_eq!(
            PingCommand.execute(&ctx, &[Bytes::from("hello")]),
            RespValue::simple_string("PONG")
        );
    }
}
