//! `bespoke:` URI handling.
//!
//! A URI has the form `bespoke:<action>[:<args>]`. Everything after the
//! second colon is the argument, so metadata URLs keep their own colons.

use std::str::FromStr;

use crate::error::ModuleError;
use crate::module::StoreIdentifier;

const SCHEME: &str = "bespoke:";

/// A decoded protocol request.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolRequest {
    /// Install from a metadata URL.
    Add(String),
    Remove(StoreIdentifier),
    Enable(StoreIdentifier),
    Disable(StoreIdentifier),
}

impl FromStr for ProtocolRequest {
    type Err = ModuleError;

    fn from_str(uri: &str) -> Result<Self, Self::Err> {
        let malformed = || ModuleError::Parse(format!("Malformed URI '{}'", uri));

        let rest = uri.trim().strip_prefix(SCHEME).ok_or_else(malformed)?;
        let (action, args) = match rest.split_once(':') {
            Some((action, args)) => (action, args),
            None => (rest, ""),
        };
        if action.is_empty() {
            return Err(malformed());
        }

        let required = || {
            if args.is_empty() {
                Err(ModuleError::Parse(format!(
                    "URI '{}' is missing the arguments of '{}'",
                    uri, action
                )))
            } else {
                Ok(args)
            }
        };

        match action {
            "add" => Ok(ProtocolRequest::Add(required()?.to_string())),
            "remove" => Ok(ProtocolRequest::Remove(required()?.parse()?)),
            "enable" => Ok(ProtocolRequest::Enable(required()?.parse()?)),
            "disable" => Ok(ProtocolRequest::Disable(required()?.parse()?)),
            other => Err(ModuleError::Parse(format!(
                "Unsupported operation '{}'",
                other
            ))),
        }
    }
}
