use half::bf16;
use rayon::prelude::*;

/// In-place division by a scalar, rounded to bf16 after every element.
pub fn div_scalar_inplace_bf16(arr: &mut [bf16], divisor: f32) -> anyhow::Result<()> {
    if divisor == 0.0 {
        anyhow::bail!("[kernel][div_scalar] division by zero");
    }

    arr.par_iter_mut()
        .for_each(|x| *x = bf16::from_f32(x.to_f32() / divisor));

    Ok(())
}

#[test]
fn test_div_scalar_inplace_bf16() {
    let mut arr: Vec<bf16> = [1.0f32, -2.0, 0.75, 3.0]
        .iter()
        .copied()
        .map(bf16::from_f32)
        .collect();

    div_scalar_inplace_bf16(&mut arr, 32.0).unwrap();

    let got: Vec<f32> = arr.iter().map(|x| x.to_f32()).collect();
    // powers of two only shift the exponent
    assert_eq!(got, vec![0.03125, -0.0625, 0.0234375, 0.09375]);
}

#[test]
fn test_div_scalar_inplace_bf16_rejects_zero() {
    let mut arr = vec![bf16::ONE; 3];
    assert!(div_scalar_inplace_bf16(&mut arr, 0.0).is_err());
    assert!(arr.iter().all(|&x| x == bf16::ONE));
}
