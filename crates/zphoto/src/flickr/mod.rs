//! Flickr group pool access.
//!
//! Lists the photos in the watched pool and picks out the ones added since
//! the last run.

mod client;
mod types;

pub use client::{
    fetch_new_items, filter_new, parse_pool_response, FetchOutcome, FlickrClient, PhotoSource,
};
pub use types::Photo;

pub(crate) use types::leading_u64;
