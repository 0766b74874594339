mod envelope;
pub use self::envelope::{ApiResponse, TokenResponse};

mod torrent;
pub use self::torrent::Torrent;

mod category;
pub use self::category::{category_id, category_name, CATEGORIES};
