//! Small utility helpers used across modules.

use chrono::Utc;
use uuid::Uuid;

/// Wall clock in epoch milliseconds.
pub fn now_ms() -> i64 {
  Utc::now().timestamp_millis()
}

/// Round to two decimal places (levels are stored at cent precision).
pub fn round2(x: f64) -> f64 {
  (x * 100.0).round() / 100.0
}

/// Lowercase base-36 rendering of a non-negative integer.
pub fn to_base36(mut n: u64) -> String {
  const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
  if n == 0 {
    return "0".into();
  }
  let mut out = Vec::new();
  while n > 0 {
    out.push(DIGITS[(n % 36) as usize]);
    n /= 36;
  }
  out.reverse();
  String::from_utf8(out).unwrap_or_default()
}

/// `sess_<8 hex>_<base36 ms>`, e.g. `sess_1f0c9a2b_m2x9k1qz`.
pub fn generate_session_id(now_ms: i64) -> String {
  let uuid = Uuid::new_v4().simple().to_string();
  format!("sess_{}_{}", &uuid[..8], to_base36(now_ms.max(0) as u64))
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut cut = max;
  while !s.is_char_boundary(cut) {
    cut -= 1;
  }
  format!("{}… ({} bytes total)", &s[..cut], s.len())
}
