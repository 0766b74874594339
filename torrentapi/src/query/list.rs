use serde::Deserialize;
use serde_json::Value;

use super::common::{from_json_object, Mode, Params, Query, QueryCommon};
use crate::Error;

/// Lists the most recent torrents, optionally filtered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    #[serde(flatten)]
    pub common: QueryCommon,
}

impl Query for ListQuery {
    fn mode(&self) -> Mode {
        Mode::List
    }

    fn to_params(&self) -> Result<Params, Error> {
        let mut params = Params::new();
        self.common.add_to_params(&mut params);
        Ok(params)
    }

    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl ListQuery {
    /// Builds a query from a JSON object such as `{"min_seeders": 50}`.
    ///
    /// Fails with [`Error::InvalidInput`] when `value` is not an object.
    /// Unknown keys are ignored and logged at debug level.
    pub fn from_json(value: &Value) -> Result<Self, Error> {
        from_json_object(value, &[])
    }
}
