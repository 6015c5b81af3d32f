use super::similarity::char_similarity;

/// 视觉加权编辑距离
///
/// 替换代价为 `1 - 相似度`，插入/删除代价固定为 1。
/// 只保留两行 DP，结果与完整 (m+1)×(n+1) 表一致。
pub fn visual_edit_distance(base: &[char], input: &[char]) -> f64 {
    let n = input.len();

    let mut prev: Vec<f64> = (0..=n).map(|j| j as f64).collect();
    let mut curr = vec![0.0; n + 1];

    for (i, &a) in base.iter().enumerate() {
        curr[0] = (i + 1) as f64;
        for (j, &b) in input.iter().enumerate() {
            let subst_cost = 1.0 - char_similarity(a, b);
            curr[j + 1] = (prev[j + 1] + 1.0) // 删除
                .min(curr[j] + 1.0) // 插入
                .min(prev[j] + subst_cost); // 替换
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// 模糊视觉匹配分数，范围 [0, 1]
///
/// 以较长字符串的长度归一化，两个空串视为完全匹配。
pub fn fuzzy_visual_score(base: &str, input: &str) -> f64 {
    let base: Vec<char> = base.chars().collect();
    let input: Vec<char> = input.chars().collect();

    let max_len = base.len().max(input.len());
    if max_len == 0 {
        return 1.0;
    }

    let distance = visual_edit_distance(&base, &input);
    (1.0 - distance / max_len as f64).clamp(0.0, 1.0)
}
