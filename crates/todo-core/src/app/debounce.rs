//! Debouncer - 入力が落ち着いてから値を確定する
//!
//! 検索ボックスのキー入力ごとに `push` し、最後の入力から `delay` 経過した
//! 値だけを Query に反映する。時間は `tokio::time` を使うので、テストでは
//! `start_paused` で進められる。

use std::time::Duration;

use tokio::time::{Instant, sleep_until};

/// デフォルトの待ち時間
pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// 新しい値で待ち時間をやり直す
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 待ち時間が過ぎていれば値を取り出す
    pub fn take_settled(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= Instant::now() => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// 保留中の値が確定するまで待つ。何も無ければ即 `None`
    ///
    /// 待っている間に `push` はできないので、キー入力と並べるときは
    /// `tokio::select!` で本 future を作り直す。
    pub async fn settled(&mut self) -> Option<T> {
        let deadline = self.pending.as_ref().map(|(_, deadline)| *deadline)?;
        sleep_until(deadline).await;
        self.pending.take().map(|(value, _)| value)
    }
}
