use chrono::NaiveDate;
use shared::data::{EntryRequest, ExitRequest, VehicleType};

use crate::error::Error;

/// What the user typed into the entry form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryForm {
    pub number: String,
    pub vtype: VehicleType,
    pub vip: bool,
}

impl EntryForm {
    /// The number is trimmed but otherwise sent as is. Empty numbers are refused by the server.
    #[must_use]
    pub fn to_request(&self) -> EntryRequest {
        EntryRequest {
            number: self.number.trim().to_string(),
            vtype: self.vtype,
            vip: self.vip,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExitForm {
    pub number: String,
}

impl ExitForm {
    #[must_use]
    pub fn to_request(&self) -> ExitRequest {
        ExitRequest {
            number: self.number.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueForm {
    pub date: String,
}

impl RevenueForm {
    /// A blank date asks for today.
    ///
    /// # Errors
    ///
    /// This function will return an error if the date is not written as YYYY-MM-DD.
    pub fn date(&self) -> Result<Option<NaiveDate>, Error> {
        let date = self.date.trim();
        if date.is_empty() {
            return Ok(None);
        }

        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| Error::InvalidDate(date.to_string()))
    }
}
