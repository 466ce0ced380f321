//! Hide one or two messages in a grid of random letters.
//!
//! Each message is laid into the grid by one of four [`Algorithm`]s and can
//! be read back by anyone holding its short integer [`Key`]. Cells carrying a
//! message letter are locked, so later messages with other keys can share the
//! grid without overwriting earlier ones.
//!
//! ```
//! use grid_cipher::{Algorithm, Key, Matrix};
//!
//! let mut matrix = Matrix::from_rows(["ABCDE", "FGHIJ", "KLMNO", "PQRST", "UVWXY"]).unwrap();
//! let key: Key = "1,2,3,4,5".parse().unwrap();
//! let mut rng = rand::thread_rng();
//!
//! matrix.add_message(Algorithm::Row, "hello", Some(&key), &mut rng).unwrap();
//! assert_eq!(matrix.decode(Algorithm::Row, &key).unwrap(), "HELLO");
//! ```

mod algorithm;
mod alphabet;
mod builder;
mod config;
mod encoder;
mod error;
mod grid;
mod key;
mod matrix;
mod message;
mod method;
mod registry;
mod traversal;
pub mod visualize;

pub use algorithm::Algorithm;
pub use alphabet::Alphabet;
pub use builder::{Built, GridBuilder, Request};
pub use config::CipherConfig;
pub use encoder::{Encoder, DEFAULT_MAX_SKIP};
pub use error::Error;
pub use key::Key;
pub use matrix::Matrix;
pub use message::{Message, SEPARATOR};
pub use registry::{random_key, Candidate, KeyRegistry};
pub use traversal::Traversal;
