//! Shorthands combining an operation with a severity.
//!
//! `logger.awaiting(msg, args)` is `logger.operation(Operation::Await)`
//! followed by `.info(msg, args)` on the result, and the derived logger is
//! returned so follow-up records keep the operation. `success` is an alias
//! of `done` at every severity.

use crate::logger::Logger;
use crate::operation::Operation;
use crate::value::Value;

macro_rules! sugar {
    ($severity:ident: $($name:ident => $operation:ident, $doc:literal;)+) => {
        impl Logger {
            $(
                #[doc = $doc]
                #[track_caller]
                pub fn $name(&self, message: impl Into<Value>, args: &[Value]) -> Logger {
                    let next = self.operation(Operation::$operation);
                    next.$severity(message, args);
                    next
                }
            )+
        }
    };
}

sugar! { info:
    note => Note, "INFO record with operation NOTE.";
    awaiting => Await, "INFO record with operation AWAIT.";
    done => Done, "INFO record with operation DONE.";
    success => Done, "INFO record with operation DONE, same as [`Logger::done`].";
    io => Io, "INFO record with operation IO.";
}

sugar! { warn:
    warn_note => Note, "WARN record with operation NOTE.";
    warn_awaiting => Await, "WARN record with operation AWAIT.";
    warn_done => Done, "WARN record with operation DONE.";
    warn_success => Done, "WARN record with operation DONE, same as [`Logger::warn_done`].";
    warn_io => Io, "WARN record with operation IO.";
}

sugar! { error:
    error_note => Note, "ERROR record with operation NOTE.";
    error_awaiting => Await, "ERROR record with operation AWAIT.";
    error_done => Done, "ERROR record with operation DONE.";
    error_success => Done, "ERROR record with operation DONE, same as [`Logger::error_done`].";
    error_io => Io, "ERROR record with operation IO.";
}

sugar! { debug:
    debug_note => Note, "DEBUG record with operation NOTE.";
    debug_awaiting => Await, "DEBUG record with operation AWAIT.";
    debug_done => Done, "DEBUG record with operation DONE.";
    debug_success => Done, "DEBUG record with operation DONE, same as [`Logger::debug_done`].";
    debug_io => Io, "DEBUG record with operation IO.";
}
