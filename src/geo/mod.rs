pub mod names;
pub mod projection;
pub mod topology;

pub use names::{NameTable, normalize_id};
pub use projection::{Margins, Projection};
pub use topology::decode_shapes;
