//! Client for the [IPLocate.io](https://iplocate.io) IP geolocation and threat intelligence
//! API.
//!
//! ```no_run
//! let client = iplocate::Client::default().with_api_key("your-api-key");
//! let info = client.lookup("8.8.8.8")?;
//! println!("{} is in {:?}", info.ip, info.country);
//! # Ok::<(), iplocate::Error>(())
//! ```

// the only module doing network I/O
mod client;
mod error;
mod lookup;

pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT};
pub use self::error::{ApiError, Error, Result};
pub use self::lookup::{Abuse, Asn, Company, Hosting, LookupResponse, Privacy};
