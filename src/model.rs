//! Contract Domain Model
//!
//! The Contract entity links a consultant to a unit for a date range and
//! contract type. Date fields are opaque strings on the wire; this service
//! performs no date parsing or validation.

use serde::{Deserialize, Serialize};

/// A contract linking a consultant to a unit over a date range.
///
/// The id is assigned by the store on first save and is immutable afterwards.
/// Request bodies may omit the id entirely (or send null); responses always
/// carry the store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    /// Store-assigned unique identifier, absent until first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Identifier of the unit the consultant is placed with
    pub unit_id: String,
    /// Identifier of the consultant
    pub consultant_id: String,
    /// Start of the contract period (opaque string, not parsed)
    pub start_date: String,
    /// End of the contract period (opaque string, not parsed)
    pub end_date: String,
    /// Contract type label
    #[serde(rename = "type")]
    pub contract_type: String,
}

impl Contract {
    /// Overwrites every non-id field from the given contract.
    ///
    /// PUT is a wholesale replacement of the five mutable fields; the id is
    /// never altered. Partial updates are not supported.
    pub fn apply_update(&mut self, update: Contract) {
        self.consultant_id = update.consultant_id;
        self.unit_id = update.unit_id;
        self.start_date = update.start_date;
        self.end_date = update.end_date;
        self.contract_type = update.contract_type;
    }
}
