use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

/// Источник текущего момента и местного времени.
///
/// Нужен только для восстановления даты старта, когда дата в отчёте
/// нечитаема: `start = now - realtime`. Вычитание идёт по абсолютной шкале,
/// в местное время переводится уже результат, поэтому переход на летнее
/// время внутри набора не сдвигает дату старта.
pub trait Clock {
    /// Текущий момент.
    fn now(&self) -> DateTime<Utc>;

    /// Местное (настенное) время для момента `instant`.
    fn local(
        &self,
        instant: DateTime<Utc>,
    ) -> NaiveDateTime;
}

/// Системные часы в часовом поясе машины.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

/// Часы, всегда возвращающие один и тот же момент в часовом поясе `Tz`
/// (для тестов и повторяемых конвертаций).
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone = Utc>(pub DateTime<Tz>);

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local(
        &self,
        instant: DateTime<Utc>,
    ) -> NaiveDateTime {
        instant.with_timezone(&Local).naive_local()
    }
}

impl FixedClock<Utc> {
    /// Часы, для которых местное время совпадает с UTC.
    pub fn utc(at: NaiveDateTime) -> Self {
        FixedClock(at.and_utc())
    }
}

impl<Tz: TimeZone> Clock for FixedClock<Tz> {
    fn now(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    fn local(
        &self,
        instant: DateTime<Utc>,
    ) -> NaiveDateTime {
        instant.with_timezone(&self.0.timezone()).naive_local()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn local(
        &self,
        instant: DateTime<Utc>,
    ) -> NaiveDateTime {
        (**self).local(instant)
    }
}
