// src/common/clock.rs

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Timelike, Utc};

/// Intervalo meio-aberto `[start, end)` em UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// A fatia de mesmo tamanho imediatamente anterior.
    pub fn previous(&self) -> Self {
        let len = self.end - self.start;
        Self { start: self.start - len, end: self.start }
    }
}

// O "relógio do negócio": um offset fixo que define meia-noite local e dia civil.
#[derive(Debug, Clone, Copy)]
pub struct BusinessClock {
    offset: FixedOffset,
    // Instante fixo para testes; em produção, sempre None
    pinned: Option<DateTime<Utc>>,
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl BusinessClock {
    pub fn utc() -> Self {
        Self { offset: Utc.fix(), pinned: None }
    }

    /// `None` se o offset estiver fora de ±24h.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset, pinned: None })
    }

    #[cfg(test)]
    pub fn pinned_at(self, instant: DateTime<Utc>) -> Self {
        Self { pinned: Some(instant), ..self }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.pinned.unwrap_or_else(Utc::now)
    }

    pub fn local_date(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    pub fn local_hour(&self, now: DateTime<Utc>) -> u32 {
        now.with_timezone(&self.offset).hour()
    }

    /// `[00:00:00.000, 23:59:59.999]` do dia civil, como intervalo meio-aberto.
    pub fn day_window(&self, date: NaiveDate) -> TimeWindow {
        let midnight = date.and_time(chrono::NaiveTime::MIN);
        // Offset fixo: nunca há horário ambíguo ou inexistente
        let start = self
            .offset
            .from_local_datetime(&midnight)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&midnight));
        TimeWindow { start, end: start + Duration::days(1) }
    }

    pub fn today(&self, now: DateTime<Utc>) -> TimeWindow {
        self.day_window(self.local_date(now))
    }
}
