//! RandomSource port - 乱数の抽象化
//!
//! CTA の選択、viral_potential、投稿 ID の suffix、シミュレーションの件数などは
//! すべてこの port 経由で乱数を得ます。グローバルな乱数には触れません。
//!
//! # 実装
//! - **OsRandom**: OS の CSPRNG（本番用）
//! - **SeededRandom**: シード固定の StdRng（テスト用、決定的）

use rand::{Rng, RngCore};

/// RandomSource は `RngCore` を貸し出す
///
/// 派生メソッド（`below`, `uniform`, `hex_token`, `choose_index`）は
/// すべて `with_rng` の上に `rand::Rng` で作られるので、実装は 1 メソッドだけで良い。
pub trait RandomSource: Send + Sync {
    /// 生成器を借りて `f` を 1 回呼ぶ
    fn with_rng(&self, f: &mut dyn FnMut(&mut dyn RngCore));

    /// `[0, bound)` の整数。`bound == 0` なら 0。
    fn below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let mut value = 0;
        self.with_rng(&mut |rng: &mut dyn RngCore| value = rng.gen_range(0..bound));
        value
    }

    /// `[low, high)` の一様な実数。`high <= low` なら `low`。
    fn uniform(&self, low: f64, high: f64) -> f64 {
        if !(high > low) {
            return low;
        }
        let mut value = low;
        self.with_rng(&mut |rng: &mut dyn RngCore| value = rng.gen_range(low..high));
        value
    }

    /// `bytes` バイト分の乱数を小文字 hex で返す
    fn hex_token(&self, bytes: usize) -> String {
        let mut buf = vec![0u8; bytes];
        self.with_rng(&mut |rng: &mut dyn RngCore| rng.fill_bytes(&mut buf));
        buf.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// `len` 個の候補から 1 つ選ぶ。`len == 0` なら None。
    fn choose_index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.below(len as u64) as usize)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for std::sync::Arc<R> {
    fn with_rng(&self, f: &mut dyn FnMut(&mut dyn RngCore)) {
        (**self).with_rng(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::sync::Mutex;

    /// StepRng をそのまま貸し出す
    struct Stepped(Mutex<StepRng>);

    impl RandomSource for Stepped {
        fn with_rng(&self, f: &mut dyn FnMut(&mut dyn RngCore)) {
            f(&mut *self.0.lock().unwrap())
        }
    }

    fn stepped(initial: u64, increment: u64) -> Stepped {
        Stepped(Mutex::new(StepRng::new(initial, increment)))
    }

    #[test]
    fn uniform_with_zero_bits_returns_low() {
        assert_eq!(stepped(0, 0).uniform(7.5, 10.0), 7.5);
    }

    #[test]
    fn uniform_stays_in_range() {
        let r = stepped(1, 0x9E37_79B9_7F4A_7C15);
        for _ in 0..1_000 {
            let v = r.uniform(7.5, 10.0);
            assert!((7.5..10.0).contains(&v));
        }
    }

    #[test]
    fn uniform_with_empty_range_returns_low() {
        let r = stepped(42, 1);
        assert_eq!(r.uniform(3.0, 3.0), 3.0);
        assert_eq!(r.uniform(3.0, 1.0), 3.0);
    }

    #[test]
    fn below_zero_is_zero() {
        assert_eq!(stepped(99, 1).below(0), 0);
    }

    #[test]
    fn below_stays_under_bound() {
        let r = stepped(3, 0x9E37_79B9_7F4A_7C15);
        for _ in 0..1_000 {
            assert!(r.below(7) < 7);
        }
    }

    #[test]
    fn hex_token_has_requested_length() {
        let r = stepped(0x0123_4567_89ab_cdef, 0);
        let token = r.hex_token(10);
        assert_eq!(token.len(), 20);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(r.hex_token(0), "");
    }

    #[test]
    fn choose_index_handles_empty() {
        let r = stepped(5, 1);
        assert_eq!(r.choose_index(0), None);
        assert!(r.choose_index(4).is_some_and(|i| i < 4));
    }
}
