use chrono::NaiveDate;

/// Render a measure for CSV output: whole numbers keep one decimal (4.0),
/// everything else uses the shortest round-trip form (3.5). Magnitudes below
/// 1e-4 or from 1e16 up switch to exponent form with a signed two-digit
/// exponent (1e-05, 1.5e+16).
pub fn float_cell(val: f64) -> String {
    let abs = val.abs();
    if val != 0.0 && !(1e-4..1e16).contains(&abs) {
        return exponent_cell(val);
    }
    if val.fract() == 0.0 {
        format!("{val:.1}")
    } else {
        format!("{val}")
    }
}

fn exponent_cell(val: f64) -> String {
    let sci = format!("{val:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.abs())
}

/// Missing values are written as empty cells.
pub fn opt_float_cell(val: Option<f64>) -> String {
    val.map(float_cell).unwrap_or_default()
}

pub fn date_cell(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn opt_date_cell(date: Option<NaiveDate>) -> String {
    date.map(date_cell).unwrap_or_default()
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
