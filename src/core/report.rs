use crate::domain::model::{CategoryPacing, CoachingReport, PacingResult};

const RULE: &str = "---------------------------------------------------------";

pub struct ReportBuilder<'a> {
    results: &'a PacingResult,
    signature: String,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(results: &'a PacingResult) -> Self {
        Self {
            results,
            signature: "Your Daily Commission Coach Bot".to_string(),
        }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    pub fn subject(&self) -> String {
        let time = &self.results.time;
        format!(
            "Daily Sales Coaching Report – Day {}/{}",
            time.current_day, time.total_days
        )
    }

    pub fn build(&self) -> CoachingReport {
        CoachingReport {
            subject: self.subject(),
            body: self.body(),
        }
    }

    fn body(&self) -> String {
        let r = self.results;
        let time = &r.time;
        let avg = &r.averages;

        let mut lines = vec![
            "Good Morning,".to_string(),
            String::new(),
            format!(
                "Here is your daily coaching report based on the performance metrics and targets as of Day {} out of {} (with {} days remaining).",
                time.current_day,
                time.total_days,
                time.days_remaining()
            ),
        ];
        if time.is_elapsed() {
            lines.push(String::new());
            lines.push(
                "Note: the reporting period has ended, so daily pace requirements are shown as 0."
                    .to_string(),
            );
        }

        section(&mut lines, "1. Time & Performance Overview:");
        lines.push(format!("- Current Day: {}", time.current_day));
        lines.push(format!("- Total Days in Period: {}", time.total_days));
        lines.push(format!("- Days Remaining: {}", time.days_remaining()));

        section(&mut lines, "2. Phone Adds (Counts):");
        count_lines(&mut lines, &PHONE_LABELS, &r.phone);
        lines.push(String::new());
        lines.push(format!(
            "Insight: You've been averaging {:.2} phone adds per day. Adjust your focus accordingly to meet your base or stretch targets.",
            avg.phone
        ));

        section(&mut lines, "3. Internet (FWA) Adds (Counts):");
        count_lines(&mut lines, &INTERNET_LABELS, &r.internet);
        lines.push(String::new());
        lines.push(format!(
            "Insight: You've been averaging {:.2} internet adds per day. Aim for the higher stretch target if bonus incentives are a priority.",
            avg.internet
        ));

        section(&mut lines, "4. Combined Adds (Phone + Internet) (Counts):");
        count_lines(&mut lines, &COMBINED_LABELS, &r.combined);
        lines.push(String::new());
        lines.push(format!(
            "Insight: Your combined adds average is {:.2} per day. Consider bundling offers to boost both phone and internet activations.",
            avg.combined
        ));

        section(&mut lines, "5. Revenue Targets:");
        let rev = &r.revenue;
        lines.push(format!("- Sales Dollar Quota: ${:.2}", rev.target));
        lines.push(format!("- Sales Dollar Attainment: ${:.2}", rev.achieved));
        lines.push(format!("- Remaining Revenue Needed: ${:.2}", rev.remaining));
        lines.push(format!(
            "- Daily Revenue Required (1.0 Bucket): ${:.2} per day",
            rev.daily_base
        ));
        lines.push(format!(
            "- Daily Revenue Required (Stretch 1.3 Bucket): ${:.2} per day",
            rev.daily_stretch
        ));
        lines.push(String::new());
        lines.push(format!(
            "Insight: Your current revenue average is ${:.2} per day. Maintain or exceed this to drive higher multipliers.",
            avg.revenue
        ));

        section(&mut lines, "6. Overall Coaching Recommendations:");
        lines.push(format!(
            "- Focus on Phone Adds: You need to average approximately {:.2} adds per day to meet the base target or {:.2} for stretch. Consider prioritizing calls that convert into phone add dollars.",
            r.phone.daily_base, r.phone.daily_stretch
        ));
        lines.push(format!(
            "- Boost Internet Activations: With a target of {:.2} adds for base and {:.2} for stretch, increase your emphasis on home internet upsells if the opportunity arises.",
            r.internet.daily_base, r.internet.daily_stretch
        ));
        lines.push(format!(
            "- Combined Strategy: Optimizing your bundle offers could help meet the combined target, given your current combined adds average of {:.2} per day.",
            avg.combined
        ));
        lines.push(
            "- Revenue Push: Given the current revenue performance, continue to leverage high-margin products and upsell to maximize your earnings."
                .to_string(),
        );

        lines.push(String::new());
        lines.push("Keep pushing, and stay focused on the most critical gap areas. Your efforts today will set the pace for a successful period!".to_string());
        lines.push(String::new());
        lines.push("Best regards,".to_string());
        lines.push(self.signature.clone());

        let mut body = lines.join("\n");
        body.push('\n');
        body
    }
}

/// 各類別數量區塊的標籤
struct CountLabels {
    target: &'static str,
    achieved: &'static str,
    remaining: &'static str,
    daily: &'static str,
}

const PHONE_LABELS: CountLabels = CountLabels {
    target: "Base Phone Adds Target",
    achieved: "Phone Adds Achieved",
    remaining: "Remaining Phone Adds Needed",
    daily: "Daily Phone Adds Required",
};

const INTERNET_LABELS: CountLabels = CountLabels {
    target: "Base Internet Adds Target",
    achieved: "Internet Adds Achieved",
    remaining: "Remaining Internet Adds Needed",
    daily: "Daily Internet Adds Required",
};

const COMBINED_LABELS: CountLabels = CountLabels {
    target: "Combined Target (1.0)",
    achieved: "Combined Achieved",
    remaining: "Remaining Combined Adds Needed",
    daily: "Daily Combined Adds Required",
};

fn section(lines: &mut Vec<String>, title: &str) {
    lines.extend([
        String::new(),
        RULE.to_string(),
        title.to_string(),
        RULE.to_string(),
    ]);
}

fn count_lines(lines: &mut Vec<String>, labels: &CountLabels, pacing: &CategoryPacing) {
    lines.push(format!("- {}: {:.1} counts", labels.target, pacing.target));
    lines.push(format!("- {}: {:.1} counts", labels.achieved, pacing.achieved));
    lines.push(format!("- {}: {:.1} counts", labels.remaining, pacing.remaining));
    lines.push(format!(
        "- {} (1.0 Bucket): {:.2} adds/day",
        labels.daily, pacing.daily_base
    ));
    lines.push(format!(
        "- {} (Stretch 1.3 Bucket): {:.2} adds/day",
        labels.daily, pacing.daily_stretch
    ));
}
