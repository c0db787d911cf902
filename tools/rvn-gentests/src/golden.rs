use anyhow::{Context, Result, bail};
use rvn_core_tensor::Tensor;

/// One input/output pair, both flattened row-major and widened to f32.
///
/// On disk the two halves are just concatenated, a reader needs to know
/// the split point (`input.len()`) up front.
#[derive(Debug, Clone, PartialEq)]
pub struct GoldenVectors {
    pub input: Vec<f32>,
    pub output: Vec<f32>,
}

impl GoldenVectors {
    pub fn new(input: &Tensor, output: &Tensor) -> Result<Self> {
        if input.shape() != output.shape() {
            bail!(
                "golden: input {:?} and output {:?} shapes differ",
                input.shape(),
                output.shape()
            );
        }
        Ok(Self {
            input: input.to_f32_vec()?,
            output: output.to_f32_vec()?,
        })
    }

    pub fn token_count(&self) -> usize {
        self.input.len() + self.output.len()
    }

    /// Every value followed by a single space, input first, no newline.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.token_count() * 12);
        for &v in self.input.iter().chain(self.output.iter()) {
            out.push_str(&repr_f32(v));
            out.push(' ');
        }
        out
    }

    /// Split a rendered file back into halves of `split` tokens each side.
    pub fn parse(text: &str, split: usize) -> Result<Self> {
        let values = text
            .split_whitespace()
            .enumerate()
            .map(|(i, tok)| {
                tok.parse::<f32>()
                    .with_context(|| format!("golden: token {} '{}' is not a float", i, tok))
            })
            .collect::<Result<Vec<f32>>>()?;

        if values.len() != 2 * split {
            bail!(
                "golden: expected {} tokens, found {}",
                2 * split,
                values.len()
            );
        }

        let mut input = values;
        let output = input.split_off(split);
        Ok(Self { input, output })
    }
}

/// Shortest round-trip decimal for `value`, laid out like Python's `repr`
/// of a float: positional for exponents in `-4..16`, always with a
/// fractional part, scientific otherwise with a signed two digit exponent.
///
/// `1.0`, `0.0234375`, `512.0`, `3.0517578125e-05`, `1.8446744073709552e+19`
pub fn repr_f32(value: f32) -> String {
    let v = f64::from(value);
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if v == 0.0 {
        return if v.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sign = if v.is_sign_negative() { "-" } else { "" };
    let v = v.abs();

    // `{:e}` yields the shortest digits that round-trip, but breaks an exact
    // midpoint between two candidates upwards; the shortest-length rounding
    // of the exact expansion, ties to even, wins whenever it round-trips
    let Some((mut digits, mut exp)) = split_sci(&format!("{:e}", v)) else {
        return format!("{}{:e}", sign, v);
    };
    // every f32 has a finite expansion well under 120 digits
    if let Some((exact, e)) = split_sci(&format!("{:.120e}", v)) {
        let (even, even_exp) = round_half_even(&exact, digits.len(), e);
        if even != digits && parses_to(&even, even_exp, v) {
            (digits, exp) = (even, even_exp);
        }
    }

    let mut out = String::with_capacity(digits.len() + 8);
    out.push_str(sign);

    if (-4..16).contains(&exp) {
        if exp >= 0 {
            let int_len = exp as usize + 1;
            if digits.len() <= int_len {
                out.push_str(&digits);
                out.extend(std::iter::repeat_n('0', int_len - digits.len()));
                out.push_str(".0");
            } else {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            }
        } else {
            out.push_str("0.");
            out.extend(std::iter::repeat_n('0', (-exp - 1) as usize));
            out.push_str(&digits);
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let exp_sign = if exp < 0 { '-' } else { '+' };
        out.push_str(&format!("e{}{:02}", exp_sign, exp.abs()));
    }

    out
}

/// `"2.5e-3"` -> (`"25"`, -3). Expects a non-negative `{:e}` rendering.
fn split_sci(sci: &str) -> Option<(String, i32)> {
    let (mantissa, exp) = sci.split_once('e')?;
    let exp = exp.parse::<i32>().ok()?;
    let digits = mantissa.chars().filter(|c| *c != '.').collect();
    Some((digits, exp))
}

fn parses_to(digits: &str, exp: i32, v: f64) -> bool {
    let text = format!("0.{}e{}", digits, exp + 1);
    text.parse::<f64>().is_ok_and(|p| p == v)
}

/// Keep `keep` significant digits, ties to even, trailing zeros dropped.
fn round_half_even(digits: &str, keep: usize, exp: i32) -> (String, i32) {
    let bytes = digits.as_bytes();
    if bytes.len() <= keep {
        return (digits.to_string(), exp);
    }

    let mut head = bytes[..keep].to_vec();
    let rest = &bytes[keep..];
    let round_up = match rest[0] {
        b'6'..=b'9' => true,
        b'5' => rest[1..].iter().any(|&d| d != b'0') || (head[keep - 1] - b'0') % 2 == 1,
        _ => false,
    };

    let mut exp = exp;
    if round_up {
        let mut i = keep;
        loop {
            if i == 0 {
                // 99..9 carried into a new leading digit
                head.insert(0, b'1');
                head.truncate(keep);
                exp += 1;
                break;
            }
            i -= 1;
            if head[i] == b'9' {
                head[i] = b'0';
            } else {
                head[i] += 1;
                break;
            }
        }
    }

    while head.len() > 1 && head.last() == Some(&b'0') {
        head.pop();
    }
    (head.iter().map(|&b| b as char).collect(), exp)
}
