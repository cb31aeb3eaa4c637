// Axis tick labels

use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{map_res, verify},
    sequence::{terminated, tuple},
    IResult,
};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn digits<const N: usize>(input: &str) -> IResult<&str, u32> {
    map_res(take_while_m_n(N, N, |c: char| c.is_ascii_digit()), str::parse::<u32>)(input)
}

/// Parse the `YYYY-MM-DD` prefix of a date or timestamp.
fn iso_date(input: &str) -> IResult<&str, (u32, u32, u32)> {
    tuple((
        terminated(digits::<4>, char('-')),
        terminated(verify(digits::<2>, |m: &u32| (1..=12).contains(m)), char('-')),
        verify(digits::<2>, |d: &u32| (1..=31).contains(d)),
    ))(input)
}

/// Game dates become `Mar 15`; seasons and other labels pass through.
pub fn format_tick(label: &str) -> String {
    match iso_date(label) {
        Ok((rest, (_, month, day)))
            if rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ') =>
        {
            format!("{} {}", MONTHS[(month - 1) as usize], day)
        }
        _ => label.to_string(),
    }
}
