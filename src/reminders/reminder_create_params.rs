use serde::Deserialize;

/// Parameters accepted by the reminder intake.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCreateParams {
    /// Email address the reminder should be delivered to.
    pub recipient: String,
    /// Description of the task to remind about.
    pub task_description: String,
    /// Local date in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Local time in `HH:MM` or `HH:MM:SS` format.
    pub local_time: String,
    /// Named time zone the local date and time are specified in. If omitted, the configured
    /// default zone is used.
    #[serde(default)]
    pub zone_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::ReminderCreateParams;
    use insta::assert_debug_snapshot;

    #[test]
    fn deserialization() -> anyhow::Result<()> {
        assert_debug_snapshot!(serde_json::from_str::<ReminderCreateParams>(
            r#"{
                "recipient": "dev@remindmail.dev",
                "taskDescription": "Water the plants",
                "localDate": "2025-10-25",
                "localTime": "10:30",
                "zoneName": "Asia/Kolkata"
            }"#
        )?, @r###"
        ReminderCreateParams {
            recipient: "dev@remindmail.dev",
            task_description: "Water the plants",
            local_date: "2025-10-25",
            local_time: "10:30",
            zone_name: Some(
                "Asia/Kolkata",
            ),
        }
        "###);

        let params = serde_json::from_str::<ReminderCreateParams>(
            r#"{
                "recipient": "dev@remindmail.dev",
                "taskDescription": "Water the plants",
                "localDate": "2025-10-25",
                "localTime": "10:30"
            }"#,
        )?;
        assert_eq!(params.zone_name, None);

        assert!(serde_json::from_str::<ReminderCreateParams>(
            r#"{ "recipient": "dev@remindmail.dev", "localDate": "2025-10-25", "localTime": "10:30" }"#
        )
        .is_err());

        Ok(())
    }
}
