use chrono::{DateTime, Local, NaiveDate, Utc};

/// 时钟能力：提交时间、考勤"今天"都从这里取
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    // 考勤按服务器本地日期
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
