//! 转盘抽奖的纯计算部分：按概率选奖品、计算展示角度

use crate::entities::prize_entity;
use crate::error::{AppError, AppResult};
use rand::Rng;

/// 转盘固定 8 格
pub const SEGMENT_COUNT: usize = 8;
/// 每格角度
pub const SEGMENT_ANGLE: f64 = 360.0 / SEGMENT_COUNT as f64;
/// 停止角度的随机偏移上限 (±度)
pub const MAX_JITTER_DEGREES: f64 = 10.0;
/// 概率合计允许的浮点误差
pub const PROBABILITY_TOLERANCE: f64 = 0.01;

/// 带权重的转盘格子
pub trait Weighted {
    fn weight(&self) -> f64;
}

impl Weighted for prize_entity::Model {
    fn weight(&self) -> f64 {
        self.probability
    }
}

/// 累积概率法选出一个格子。
///
/// `items` 须按 position 升序且恰好 8 个；在 `[0, total)` 上取随机数，
/// 返回第一个累积和大于该数的格子，权重为 0 的格子不会被选中。
/// 浮点误差导致无匹配时返回最后一个有权重的格子。
pub fn select_weighted<'a, T, R>(items: &'a [T], rng: &mut R) -> AppResult<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    if items.len() != SEGMENT_COUNT {
        return Err(AppError::ConfigError(format!(
            "Expected {SEGMENT_COUNT} prizes, found {}",
            items.len()
        )));
    }

    let total: f64 = items.iter().map(|p| p.weight().max(0.0)).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(AppError::ConfigError(
            "Total prize probability must be positive".into(),
        ));
    }

    let pick: f64 = rng.gen_range(0.0..total);
    let mut acc = 0.0;
    for item in items {
        acc += item.weight().max(0.0);
        if pick < acc {
            return Ok(item);
        }
    }

    items
        .iter()
        .rev()
        .find(|p| p.weight() > 0.0)
        .ok_or_else(|| AppError::ConfigError("No prize with positive probability".into()))
}

/// 转盘停止角度 = 目标格子角度 + 3~6 整圈 + ±10° 随机偏移
pub fn spin_angle<R: Rng + ?Sized>(position: i32, rng: &mut R) -> f64 {
    let target = f64::from(position - 1) * SEGMENT_ANGLE;
    let extra_rotations = f64::from(rng.gen_range(3u32..=6));
    let jitter = rng.gen_range(-MAX_JITTER_DEGREES..MAX_JITTER_DEGREES);
    extra_rotations * 360.0 + target + jitter
}

/// 校验一组概率：每项 0..=100，合计 100 (允许 0.01 误差)
pub fn validate_probabilities(probabilities: &[f64]) -> AppResult<()> {
    if probabilities
        .iter()
        .any(|p| !p.is_finite() || *p < 0.0 || *p > 100.0)
    {
        return Err(AppError::ValidationError(
            "Probability must be between 0-100".into(),
        ));
    }
    let total: f64 = probabilities.iter().sum();
    if (total - 100.0).abs() > PROBABILITY_TOLERANCE {
        return Err(AppError::ValidationError(
            "Total probability must equal 100%".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    impl Weighted for (i32, f64) {
        fn weight(&self) -> f64 {
            self.1
        }
    }

    /// 由停止角度反推格子 (1..=8)
    fn segment_for_angle(angle: f64) -> i32 {
        let normalized = angle.rem_euclid(360.0);
        let index = (normalized / SEGMENT_ANGLE).round() as i32 % SEGMENT_COUNT as i32;
        index + 1
    }

    fn table(weights: [f64; 8]) -> Vec<(i32, f64)> {
        weights
            .iter()
            .enumerate()
            .map(|(i, w)| (i as i32 + 1, *w))
            .collect()
    }

    #[test]
    fn test_single_weighted_segment_always_wins() {
        let prizes = table([100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            assert_eq!(select_weighted(&prizes, &mut rng).unwrap().0, 1);
        }
    }

    #[test]
    fn test_zero_weight_segments_are_never_chosen() {
        let prizes = table([0.0, 0.0, 50.0, 0.0, 0.0, 50.0, 0.0, 0.0]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..5_000 {
            let position = select_weighted(&prizes, &mut rng).unwrap().0;
            assert!(position == 3 || position == 6, "got {position}");
        }
    }

    #[test]
    fn test_frequencies_converge_to_probabilities() {
        let weights = [5.0, 10.0, 15.0, 20.0, 15.0, 10.0, 15.0, 10.0];
        let prizes = table(weights);
        let mut rng = StdRng::seed_from_u64(42);
        let draws = 200_000;
        let mut counts = [0usize; 8];
        for _ in 0..draws {
            let position = select_weighted(&prizes, &mut rng).unwrap().0;
            assert!((1..=8).contains(&position));
            counts[(position - 1) as usize] += 1;
        }
        for (i, count) in counts.iter().enumerate() {
            let observed = *count as f64 / draws as f64 * 100.0;
            assert!(
                (observed - weights[i]).abs() < 0.5,
                "position {}: expected {}%, observed {observed:.3}%",
                i + 1,
                weights[i]
            );
        }
    }

    #[test]
    fn test_wrong_prize_count_is_config_error() {
        let prizes: Vec<(i32, f64)> = (1..=7).map(|p| (p, 100.0 / 7.0)).collect();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_weighted(&prizes, &mut rng),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_all_zero_weights_is_config_error() {
        let prizes = table([0.0; 8]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_weighted(&prizes, &mut rng),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_spin_angle_lands_on_target_segment() {
        let mut rng = StdRng::seed_from_u64(3);
        for position in 1..=8 {
            for _ in 0..200 {
                let angle = spin_angle(position, &mut rng);
                assert!(angle >= 3.0 * 360.0 - MAX_JITTER_DEGREES);
                assert!(angle < 7.0 * 360.0);
                assert_eq!(segment_for_angle(angle), position);
            }
        }
    }

    #[test]
    fn test_spin_angle_position_three_is_ninety_degrees_mod_360() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let angle = spin_angle(3, &mut rng);
            let residue = angle.rem_euclid(360.0);
            assert!((residue - 90.0).abs() <= MAX_JITTER_DEGREES, "{residue}");
        }
    }

    #[test]
    fn test_validate_probabilities() {
        assert!(validate_probabilities(&[12.5; 8]).is_ok());
        assert!(validate_probabilities(&[5.0, 10.0, 15.0, 20.0, 15.0, 10.0, 15.0, 10.005]).is_ok());
        assert!(validate_probabilities(&[10.0; 8]).is_err());
        assert!(validate_probabilities(&[-5.0, 105.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).is_err());
    }
}
