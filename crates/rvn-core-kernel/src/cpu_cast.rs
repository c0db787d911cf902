use half::bf16;
use half::slice::HalfFloatSliceExt;

/// Widen bf16 values into an f32 buffer. Exact, every bf16 is an f32.
pub fn bf16_to_f32_arr(input: &[bf16], output: &mut [f32]) -> anyhow::Result<()> {
    if input.len() != output.len() {
        anyhow::bail!("[kernel][cast] length mismatch");
    }

    input.convert_to_f32_slice(output);

    Ok(())
}

/// Narrow f32 values into bf16, round-to-nearest-even.
pub fn f32_to_bf16_arr(input: &[f32], output: &mut [bf16]) -> anyhow::Result<()> {
    if input.len() != output.len() {
        anyhow::bail!("[kernel][cast] length mismatch");
    }

    output.convert_from_f32_slice(input);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_roundtrip_exact_values() {
        let input = [0.0f32, 1.0, -2.5, 256.0, 0.0234375];
        let mut narrow = vec![bf16::ZERO; input.len()];
        let mut wide = vec![0.0f32; input.len()];

        f32_to_bf16_arr(&input, &mut narrow).unwrap();
        bf16_to_f32_arr(&narrow, &mut wide).unwrap();

        assert_eq!(wide, input);
    }

    #[test]
    fn test_narrowing_rounds_nearest_even() {
        let input = [257.0f32, 259.0, 511.0, 1.0 + 1.0 / 512.0];
        let mut narrow = vec![bf16::ZERO; input.len()];
        let mut wide = vec![0.0f32; input.len()];

        f32_to_bf16_arr(&input, &mut narrow).unwrap();
        bf16_to_f32_arr(&narrow, &mut wide).unwrap();

        assert_eq!(wide, vec![256.0, 260.0, 512.0, 1.0]);
    }

    #[test]
    fn test_cast_length_mismatch() {
        let mut out = vec![0.0f32; 2];
        assert!(bf16_to_f32_arr(&[bf16::ONE], &mut out).is_err());
    }
}
