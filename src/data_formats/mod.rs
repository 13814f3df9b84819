mod request;
mod response;
mod wrapper;

pub use request::*;
pub use response::*;
pub use wrapper::*;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug)]
pub struct PageQueryParams {
    #[serde(default = "get_default_page")]
    pub page: u32,
}

fn get_default_page() -> u32 {
    1
}
