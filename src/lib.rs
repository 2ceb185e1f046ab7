//! An ordered map and set based on a red-black tree.
//!
//! Besides the usual lookups, both collections answer navigation queries (the closest key
//! below or above a probe), expose live bounded views in either direction, and hand out
//! fail-fast cursors that survive removals made through themselves.
//!
//! # Examples
//!
//! ```
//! let mut map = navtree::TreeMap::new();
//!
//! for (key, value) in [(5, 'e'), (1, 'a'), (9, 'i'), (3, 'c'), (7, 'g')] {
//!     map.insert(key, value);
//! }
//!
//! assert_eq!(map.floor_key(&4), Some(&3));
//! assert_eq!(map.higher_key(&9), None);
//!
//! let view = map.sub_map(3, true, 9, false).unwrap();
//! assert_eq!(view.keys().cloned().collect::<Vec<_>>(), [3, 5, 7]);
//!
//! let backwards = map.descending_map();
//! assert_eq!(backwards.values().collect::<String>(), "igeca");
//! ```

mod cursor;
mod entry;
mod error;
mod node;
#[cfg(feature = "ordered_iter")]
mod ordered_iter;
#[cfg(feature = "quickcheck")]
mod quickcheck;

pub mod map;
pub mod set;
pub mod tree;
pub mod view;

pub use cursor::Cursor;
pub use entry::Entry;
pub use error::{Error, Result};
pub use map::{SubMap, TreeMap};
pub use set::{SubSet, TreeSet};
pub use view::{Ascending, Backing, BackingMut, Bounds, Descending, Direction};
