//! Built-in office operations.

use super::{ParamKind, ToolCatalog, ToolSpec};

struct SeedParam {
    name: &'static str,
    kind: ParamKind,
    description: &'static str,
    required: bool,
}

struct SeedTool {
    name: &'static str,
    description: &'static str,
    params: &'static [SeedParam],
}

const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> SeedParam {
    SeedParam {
        name,
        kind,
        description,
        required: true,
    }
}

// Names and required parameters are relied on by existing callers.
const SEED: &[SeedTool] = &[
    SeedTool {
        name: "get_ticket_status",
        description: "Get the status of an IT support ticket",
        params: &[required("ticket_id", ParamKind::Integer, "The ticket ID number")],
    },
    SeedTool {
        name: "schedule_meeting",
        description: "Schedule a meeting in a specific room",
        params: &[
            required("date", ParamKind::String, "Meeting date in YYYY-MM-DD format"),
            required("time", ParamKind::String, "Meeting time in HH:MM format"),
            required("meeting_room", ParamKind::String, "Name of the meeting room"),
        ],
    },
    SeedTool {
        name: "get_expense_balance",
        description: "Get the expense reimbursement balance for an employee",
        params: &[required("employee_id", ParamKind::Integer, "The employee ID number")],
    },
    SeedTool {
        name: "calculate_performance_bonus",
        description: "Calculate performance bonus for an employee for a specific year",
        params: &[
            required("employee_id", ParamKind::Integer, "The employee ID number"),
            required("current_year", ParamKind::Integer, "The year for bonus calculation"),
        ],
    },
    SeedTool {
        name: "report_office_issue",
        description: "Report an office issue for a department",
        params: &[
            required("issue_code", ParamKind::Integer, "The issue code number"),
            required("department", ParamKind::String, "The department name"),
        ],
    },
];

fn to_spec(seed: &SeedTool) -> ToolSpec {
    seed.params.iter().fold(ToolSpec::new(seed.name, seed.description), |spec, p| {
        spec.with_param(p.name, p.kind, p.description, p.required)
    })
}

pub(super) fn catalog() -> ToolCatalog {
    let tools = SEED.iter().map(to_spec).collect();
    ToolCatalog::new(tools).unwrap_or_else(|e| panic!("built-in catalog is inconsistent: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_contents() {
        let catalog = catalog();
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec![
                "get_ticket_status",
                "schedule_meeting",
                "get_expense_balance",
                "calculate_performance_bonus",
                "report_office_issue",
            ]
        );
    }

    #[test]
    fn test_seed_required_parameters() {
        let catalog = catalog();
        let required = |name: &str| -> Vec<(String, ParamKind)> {
            catalog
                .lookup(name)
                .unwrap()
                .required()
                .map(|p| (p.name.clone(), p.kind))
                .collect()
        };

        assert_eq!(required("get_ticket_status"), vec![("ticket_id".to_string(), ParamKind::Integer)]);
        assert_eq!(
            required("schedule_meeting"),
            vec![
                ("date".to_string(), ParamKind::String),
                ("time".to_string(), ParamKind::String),
                ("meeting_room".to_string(), ParamKind::String),
            ]
        );
        assert_eq!(required("get_expense_balance"), vec![("employee_id".to_string(), ParamKind::Integer)]);
        assert_eq!(
            required("calculate_performance_bonus"),
            vec![
                ("employee_id".to_string(), ParamKind::Integer),
                ("current_year".to_string(), ParamKind::Integer),
            ]
        );
        assert_eq!(
            required("report_office_issue"),
            vec![
                ("issue_code".to_string(), ParamKind::Integer),
                ("department".to_string(), ParamKind::String),
            ]
        );
    }

    #[test]
    fn test_seed_has_no_optional_parameters() {
        let catalog = catalog();
        assert!(catalog.all().iter().flat_map(|t| &t.parameters).all(|p| p.required));
    }
}
