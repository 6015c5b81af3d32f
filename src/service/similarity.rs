/// 大小写不同但字母相同时的相似度
pub const CASE_ONLY_SIMILARITY: f64 = 0.9;

/// 视觉易混淆字符表 (行 -> 列)，键为大写字符
///
/// 部分条目只在一个方向上登记，查询时两个方向都会尝试。
fn confusable(from: char, to: char) -> Option<f64> {
    let weight = match (from, to) {
        ('0', 'O') => 0.8,
        ('0', 'Q') => 0.6,
        ('1', 'I') => 0.8,
        ('1', 'L') => 0.6,
        ('2', 'Z') => 0.6,
        ('5', 'S') => 0.7,
        ('6', 'G') => 0.7,
        ('8', 'B') => 0.8,
        ('9', 'G') => 0.5,
        ('B', '8') => 0.8,
        ('G', '6') => 0.7,
        ('G', '9') => 0.5,
        ('O', '0') => 0.8,
        ('I', '1') => 0.8,
        ('I', 'L') => 0.6,
        ('S', '5') => 0.7,
        ('S', '$') => 0.5,
        ('$', 'S') => 0.5,
        ('@', 'A') => 0.6,
        ('A', '@') => 0.6,
        ('A', '4') => 0.6,
        ('T', '7') => 0.6,
        _ => return None,
    };
    Some(weight)
}

/// 单字符大写；大写结果为多个字符时 (如 'ß') 返回 None
fn upper(c: char) -> Option<char> {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

/// 两个字符的视觉相似度，范围 [0, 1]
pub fn char_similarity(a: char, b: char) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.to_uppercase().eq(b.to_uppercase()) {
        return CASE_ONLY_SIMILARITY;
    }

    let (Some(ua), Some(ub)) = (upper(a), upper(b)) else {
        return 0.0;
    };
    confusable(ua, ub)
        .or_else(|| confusable(ub, ua))
        .unwrap_or(0.0)
}
