//! Tagged lines written by the host on the node's stdin.

use phalanx_roster::normalize_name;
use phalanx_topology::Place;

use super::ParseError;

/// What the user asked to heal next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRequest {
    /// Whoever stands at a formation place
    Place(Place),
    /// A member by name, placed or not
    Name(String),
}

/// One host event. Payloads stay raw until the engine stamps them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// `party <fields>`: a party status message
    SourceA(String),
    /// `pss <row>`: one status table row, kept verbatim
    SourceB(String),
    /// `left <name>`
    Left(String),
    /// `target <name>` or `target <x> <y>`
    Target(TargetRequest),
    /// `reconnect`
    Reconnect,
}

impl Inbound {
    /// Split a host line into its tag and payload.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.trim_end().is_empty() {
            return Err(ParseError::Empty);
        }
        let (tag, payload) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

        match tag {
            "party" | "∴party" => Ok(Inbound::SourceA(payload.trim().to_string())),
            // The idle column may be a space, so the row is not trimmed.
            "pss" => Ok(Inbound::SourceB(payload.to_string())),
            "left" => {
                let name = normalize_name(payload);
                if name.is_empty() {
                    return Err(ParseError::EmptyName);
                }
                Ok(Inbound::Left(name))
            }
            "target" => Self::parse_target(payload.trim()),
            "reconnect" if payload.trim().is_empty() => Ok(Inbound::Reconnect),
            other => Err(ParseError::UnknownTag(other.to_string())),
        }
    }

    fn parse_target(payload: &str) -> Result<Self, ParseError> {
        if payload.is_empty() {
            return Err(ParseError::EmptyName);
        }
        let numeric = payload
            .split_whitespace()
            .all(|word| word.parse::<i32>().is_ok());

        let request = if numeric {
            TargetRequest::Place(payload.parse()?)
        } else {
            TargetRequest::Name(normalize_name(payload))
        };
        Ok(Inbound::Target(request))
    }
}
