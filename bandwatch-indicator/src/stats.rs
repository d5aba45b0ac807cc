//! 窗口统计函数

/// 以给定均值为中心的总体标准差（除以样本数而非 n - 1），空输入返回 0
pub fn std_dev(values: impl IntoIterator<Item = f64>, mean: f64) -> f64 {
    let (sum_sq, count) = values.into_iter().fold((0.0, 0usize), |(acc, count), x| {
        let diff = x - mean;
        (acc + diff * diff, count + 1)
    });

    if count == 0 {
        return 0.0;
    }
    (sum_sq / count as f64).sqrt()
}
