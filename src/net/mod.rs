/// Network access
///
/// - `fetcher.rs` - the `Fetcher` seam and its reqwest implementation

pub mod fetcher;

pub use fetcher::{FetchResult, Fetcher, HttpFetcher};

#[cfg(test)]
pub mod test_support;
