use half::bf16;
use rayon::prelude::*;

// Takes two bf16 tensors a and b
// Fills out with out[i] = a[i] + b[i]
// Sum is taken in f32 and rounded back to nearest-even bf16, the same
// thing a bf16 device kernel does
// No allocations inside
pub fn add_arr_bf16(a: &[bf16], b: &[bf16], out: &mut [bf16]) -> anyhow::Result<()> {
    if a.len() != b.len() || a.len() != out.len() {
        anyhow::bail!("add_arr_bf16: input/output length mismatch");
    }

    out.par_iter_mut()
        .zip(a.par_iter().zip(b.par_iter()))
        .for_each(|(o, (&x, &y))| *o = bf16::from_f32(x.to_f32() + y.to_f32()));

    Ok(())
}
