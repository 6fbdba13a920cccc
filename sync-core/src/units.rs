//! Human-readable byte counts for status output.

/// Format `n` with a decimal (SI) prefix, e.g. `"1.50 M"`.
pub fn metric_prefix(n: i64) -> String {
    let v = n as f64;
    if v > 1e9 {
        format!("{:.2} G", v / 1e9)
    } else if v > 1e6 {
        format!("{:.2} M", v / 1e6)
    } else if v > 1e3 {
        format!("{:.1} k", v / 1e3)
    } else {
        format!("{n} ")
    }
}

/// Format `n` with a binary (IEC) prefix, e.g. `"1.50 Mi"`.
pub fn binary_prefix(n: i64) -> String {
    const KI: i64 = 1 << 10;
    const MI: i64 = 1 << 20;
    const GI: i64 = 1 << 30;

    let v = n as f64;
    if n > GI {
        format!("{:.2} Gi", v / GI as f64)
    } else if n > MI {
        format!("{:.2} Mi", v / MI as f64)
    } else if n > KI {
        format!("{:.1} Ki", v / KI as f64)
    } else {
        format!("{n} ")
    }
}
