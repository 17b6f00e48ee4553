//! 3×3 directional kernels (Prewitt, Sobel, Kirsch, user-defined).
//!
//! Each family has a primary direction-0 kernel. The other directions are
//! obtained by rotating the eight outer weights around the centre: two
//! positions for direction 1 (90°), one and three positions for directions 2
//! and 3 (45° and 135°).
use crate::error::{DetectError, Result};
use serde::{Deserialize, Serialize};

pub type Kernel3 = [[f32; 3]; 3];

const PREWITT_KERNEL: Kernel3 = [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const KIRSCH_KERNEL: Kernel3 = [[-3.0, -3.0, 5.0], [-3.0, 0.0, 5.0], [-3.0, -3.0, 5.0]];

/// Outer ring positions, clockwise from the top-left corner.
const RING: [(usize, usize); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 1),
    (2, 0),
    (1, 0),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelFamily {
    Prewitt,
    #[default]
    Sobel,
    Kirsch,
    Custom,
}

/// Number of directional components computed per pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionMode {
    #[default]
    Bidirectional,
    Multidirectional,
}

impl DirectionMode {
    pub fn count(self) -> usize {
        match self {
            DirectionMode::Bidirectional => 2,
            DirectionMode::Multidirectional => 4,
        }
    }
}

/// Immutable 3×3 convolution kernel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel {
    weights: Kernel3,
}

impl Kernel {
    pub const fn new(weights: Kernel3) -> Self {
        Self { weights }
    }

    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f32 {
        self.weights[i][j]
    }

    pub fn weights(&self) -> &Kernel3 {
        &self.weights
    }

    /// Rotate the outer ring by `steps` positions (45° each). The centre weight
    /// stays in place.
    pub fn rotated(&self, steps: usize) -> Self {
        let mut out = self.weights;
        for (k, &(i, j)) in RING.iter().enumerate() {
            let (si, sj) = RING[(k + steps) % RING.len()];
            out[i][j] = self.weights[si][sj];
        }
        Self { weights: out }
    }
}

/// Primary (direction 0) kernel of a family. `custom` supplies the weights for
/// [`KernelFamily::Custom`].
pub fn primary_kernel(family: KernelFamily, custom: Option<&Kernel3>) -> Result<Kernel> {
    match family {
        KernelFamily::Prewitt => Ok(Kernel::new(PREWITT_KERNEL)),
        KernelFamily::Sobel => Ok(Kernel::new(SOBEL_KERNEL)),
        KernelFamily::Kirsch => Ok(Kernel::new(KIRSCH_KERNEL)),
        KernelFamily::Custom => custom.map(|w| Kernel::new(*w)).ok_or_else(|| {
            DetectError::Config("custom kernel selected but no weights were supplied".into())
        }),
    }
}

/// Kernel bank for the requested direction count, in direction order.
pub fn directional_kernels(
    family: KernelFamily,
    mode: DirectionMode,
    custom: Option<&Kernel3>,
) -> Result<Vec<Kernel>> {
    let base = primary_kernel(family, custom)?;
    let steps: &[usize] = match mode {
        DirectionMode::Bidirectional => &[0, 2],
        DirectionMode::Multidirectional => &[0, 2, 1, 3],
    };
    Ok(steps.iter().map(|&s| base.rotated(s)).collect())
}
