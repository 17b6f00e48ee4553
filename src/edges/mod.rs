//! Gradient estimation and thinning.
//!
//! - Directional 3×3 kernels (Prewitt, Sobel, Kirsch, custom) and the
//!   rotations that derive the 2- or 4-direction bank.
//! - Zero-border convolution, run once per direction.
//! - Module (L∞ or L1) and slope combination, with a color coding of the
//!   gradient direction for visualization.
//! - Non-maximum suppression on the module along the gradient direction.

pub mod filter;
pub mod grad;
pub mod kernel;
pub mod nms;

pub use filter::{filter, filter_directions};
pub use grad::{
    color_map, image_gradients, module, module_l1, module_linf, normalize, normalized, slope,
    Grad, NormType,
};
pub use kernel::{directional_kernels, DirectionMode, Kernel, Kernel3, KernelFamily};
pub use nms::local_extremum;
