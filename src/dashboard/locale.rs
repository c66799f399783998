use clap::ValueEnum;

/// Language of the rendered dashboard text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    /// Token for the deadline-breached column
    pub fn yes_no(self, value: bool) -> &'static str {
        match (self, value) {
            (Locale::Zh, true) => "是",
            (Locale::Zh, false) => "否",
            (Locale::En, true) => "yes",
            (Locale::En, false) => "no",
        }
    }

    /// Marker put in front of error messages
    pub fn error_prefix(self) -> &'static str {
        match self {
            Locale::Zh => "错误: ",
            Locale::En => "Error: ",
        }
    }

    pub fn table_headers(self) -> [&'static str; 6] {
        match self {
            Locale::Zh => ["订单", "车辆", "预计到达(h)", "距离(km)", "评分", "超时"],
            Locale::En => ["Order", "Vehicle", "ETA (h)", "Distance (km)", "Score", "Late"],
        }
    }

    pub fn kpi_labels(self) -> [&'static str; 4] {
        match self {
            Locale::Zh => ["订单总数", "已分配", "未分配", "总评分"],
            Locale::En => ["Total orders", "Assigned", "Unassigned", "Total score"],
        }
    }
}
