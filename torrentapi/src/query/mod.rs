mod common;
pub use self::common::{Format, Mode, Params, Query, QueryCommon, Sort};

mod de;

mod list;
pub use self::list::ListQuery;

mod search;
pub use self::search::SearchQuery;
