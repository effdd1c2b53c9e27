//! Analysis passes over a structurally valid graph: scheduling, shape
//! inference, parameter counting and layer naming.

pub mod count;
pub mod naming;
pub mod shapes;
pub mod topo;

pub use count::total_params;
pub use naming::{layer_names, LayerName};
pub use shapes::{infer_shapes, ShapeMap};
pub use topo::topo_sort;
