use anyhow::{Result, bail};
use half::bf16;
use rand::Rng;
use rand_distr::StandardNormal;
use rvn_core_kernel::cpu_add::add_arr_bf16;
use rvn_core_kernel::cpu_cast::{bf16_to_f32_arr, f32_to_bf16_arr};
use rvn_core_kernel::cpu_scale::div_scalar_inplace_bf16;
use smallvec::SmallVec;

/// Logical dimensions, outermost first. Inline up to rank 4.
pub type ShapeBuf = SmallVec<[usize; 4]>;

/// Owned, row-major bf16 tensor.
///
/// Every value passes through bf16 rounding on the way in, so what this
/// holds is exactly what a bf16 device kernel would read.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    data: Vec<bf16>,
    shape: ShapeBuf,
}

#[inline(always)]
fn num_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

impl Tensor {
    /// Wrap an existing buffer, checking it matches `shape`.
    pub fn from_vec(data: Vec<bf16>, shape: &[usize]) -> Result<Self> {
        let expected = num_elements(shape);
        if data.len() != expected {
            bail!(
                "tensor data length mismatch: got {}, expected {} for shape {:?}",
                data.len(),
                expected,
                shape
            );
        }
        Ok(Self {
            data,
            shape: shape.iter().copied().collect(),
        })
    }

    /// Narrow f32 values into a bf16 tensor.
    pub fn from_f32(values: &[f32], shape: &[usize]) -> Result<Self> {
        let mut data = vec![bf16::ZERO; values.len()];
        f32_to_bf16_arr(values, &mut data)?;
        Self::from_vec(data, shape)
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: vec![bf16::ONE; num_elements(shape)],
            shape: shape.iter().copied().collect(),
        }
    }

    /// 1-D tensor holding `0, 1, .., len - 1`.
    ///
    /// Integers above 256 are not representable in bf16 and round to the
    /// nearest even neighbour (257 -> 256, 511 -> 512).
    pub fn arange(len: usize) -> Self {
        Self {
            data: (0..len).map(|i| bf16::from_f32(i as f32)).collect(),
            shape: SmallVec::from_slice(&[len]),
        }
    }

    /// Standard normal samples drawn in f32, then rounded to bf16.
    pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Self {
        let data = (0..num_elements(shape))
            .map(|_| bf16::from_f32(rng.sample::<f32, _>(StandardNormal)))
            .collect();
        Self {
            data,
            shape: shape.iter().copied().collect(),
        }
    }

    /// Same data under a new shape with the same element count.
    pub fn reshape(self, shape: &[usize]) -> Result<Self> {
        if num_elements(shape) != self.data.len() {
            bail!(
                "reshape: cannot view {} elements as {:?}",
                self.data.len(),
                shape
            );
        }
        Ok(Self {
            data: self.data,
            shape: shape.iter().copied().collect(),
        })
    }

    #[inline(always)]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline(always)]
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[bf16] {
        &self.data
    }

    /// Flattened values widened to f32, row-major.
    pub fn to_f32_vec(&self) -> Result<Vec<f32>> {
        let mut out = vec![0.0f32; self.data.len()];
        bf16_to_f32_arr(&self.data, &mut out)?;
        Ok(out)
    }
}

// COMPUTE OPERATIONS - results stay in bf16

/// element-wise addition
pub fn add(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    if a.shape != b.shape {
        bail!("add: shape mismatch: {:?} vs {:?}", a.shape(), b.shape());
    }

    let mut data = vec![bf16::ZERO; a.num_elements()];
    add_arr_bf16(&a.data, &b.data, &mut data)?;

    Ok(Tensor {
        data,
        shape: a.shape.clone(),
    })
}

/// Divide every element by `divisor`, consuming the input buffer.
pub fn div_scalar(mut t: Tensor, divisor: f32) -> Result<Tensor> {
    div_scalar_inplace_bf16(&mut t.data, divisor)?;
    Ok(t)
}

impl std::ops::Add for &Tensor {
    type Output = Result<Tensor>;

    fn add(self, rhs: Self) -> Self::Output {
        crate::add(self, rhs)
    }
}
