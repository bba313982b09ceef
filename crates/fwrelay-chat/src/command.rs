//! Chat command parsing

use fwrelay_core::LookupQuery;

/// A recognized chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// `/start` or `/help`
    Start,
    /// `/query <SN> [version]` or `/mtm <MTM> [version]`
    Lookup(LookupQuery),
    /// `/query` without a serial number
    MissingSn,
    /// `/mtm` without a model code
    MissingMtm,
}

impl ChatCommand {
    /// Parse a chat message.
    ///
    /// Returns `None` for plain text and for commands this bot does not
    /// handle. A `@BotName` suffix on the command word is ignored, as are
    /// arguments beyond the second.
    pub fn parse(text: &str) -> Option<Self> {
        let mut words = text.split_whitespace();
        let command = words.next()?.strip_prefix('/')?;
        let command = command.split('@').next().unwrap_or(command);

        let key = words.next();
        let firmware = words.next();

        match command.to_ascii_lowercase().as_str() {
            "start" | "help" => Some(Self::Start),
            "query" => Some(match key {
                Some(sn) => Self::Lookup(with_firmware(LookupQuery::by_sn(sn), firmware)),
                None => Self::MissingSn,
            }),
            "mtm" => Some(match key {
                Some(mtm) => Self::Lookup(with_firmware(LookupQuery::by_mtm(mtm), firmware)),
                None => Self::MissingMtm,
            }),
            _ => None,
        }
    }
}

fn with_firmware(query: LookupQuery, firmware: Option<&str>) -> LookupQuery {
    match firmware {
        Some(version) => query.with_firmware_version(version),
        None => query,
    }
}
