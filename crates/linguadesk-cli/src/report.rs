use anyhow::{Result, bail};
use linguadesk_access::{DataCategory, PageAction, RoleRegistry, SpecialPermission};

/// A single access question asked on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Page { path: String, action: PageAction },
    Function(String),
    Data(DataCategory),
    Special(SpecialPermission),
}

impl Query {
    /// Builds a query from the mutually exclusive `check` flags.
    pub fn from_flags(
        page: Option<String>,
        action: Option<String>,
        function: Option<String>,
        data: Option<String>,
        special: Option<String>,
    ) -> Result<Self> {
        let given = [page.is_some(), function.is_some(), data.is_some(), special.is_some()]
            .into_iter()
            .filter(|set| *set)
            .count();
        if given != 1 {
            bail!("exactly one of --page, --function, --data, --special is required");
        }
        if action.is_some() && page.is_none() {
            bail!("--action only applies to --page");
        }

        if let Some(path) = page {
            let action = match action {
                Some(action) => action.parse()?,
                None => PageAction::default(),
            };
            return Ok(Query::Page { path, action });
        }
        if let Some(name) = function {
            return Ok(Query::Function(name));
        }
        if let Some(category) = data {
            return Ok(Query::Data(category.parse()?));
        }
        match special {
            Some(permission) => Ok(Query::Special(permission.parse()?)),
            None => bail!("no check given"),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Query::Page { path, action } => format!("{action} {path}"),
            Query::Function(name) => format!("function {name}"),
            Query::Data(category) => format!("data {category}"),
            Query::Special(permission) => format!("special {permission}"),
        }
    }
}

pub fn evaluate(registry: &RoleRegistry, role: &str, query: &Query) -> bool {
    match query {
        Query::Page { path, action } => registry.check_page_access(role, path, *action),
        Query::Function(name) => registry.check_function_permission(role, name),
        Query::Data(category) => registry.check_data_access(role, *category),
        Query::Special(permission) => registry.check_special_permission(role, *permission),
    }
}

pub fn roles_table(registry: &RoleRegistry) -> String {
    let mut out = format!(
        "{:<14} {:<16} {:>5} {:>9}  {}\n",
        "ID", "NAME", "PAGES", "FUNCTIONS", "SPECIAL"
    );
    for role in registry.get_all_roles() {
        let special = role
            .permissions
            .special
            .granted()
            .iter()
            .map(|permission| permission.as_str())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!(
            "{:<14} {:<16} {:>5} {:>9}  {}\n",
            role.id,
            role.name,
            role.permissions.pages.len(),
            role.permissions.functions.values().filter(|allowed| **allowed).count(),
            if special.is_empty() { "-" } else { &special },
        ));
    }
    out
}

pub fn pages_table(registry: &RoleRegistry, role: &str) -> Result<String> {
    if !registry.contains(role) {
        bail!("unknown role: {role}");
    }

    let mut out = format!("{:<28} {:<14} {}\n", "PATH", "CATEGORY", "ACTIONS");
    for page in registry.get_accessible_pages(role) {
        let actions = PageAction::ALL
            .iter()
            .filter(|action| registry.check_page_access(role, &page.path, **action))
            .map(|action| action.as_str())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!("{:<28} {:<14} {}\n", page.path, page.category, actions));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguadesk_core::names::{functions, pages, roles};

    #[test]
    fn test_query_requires_exactly_one_check() {
        assert!(Query::from_flags(None, None, None, None, None).is_err());
        assert!(
            Query::from_flags(
                Some(pages::STAFF_PAYMENTS.to_string()),
                None,
                Some(functions::MESSAGING.to_string()),
                None,
                None
            )
            .is_err()
        );
        assert!(Query::from_flags(None, Some("write".into()), Some("messaging".into()), None, None).is_err());
    }

    #[test]
    fn test_query_parses_names() {
        let query = Query::from_flags(
            Some(pages::TEACHER_HOMEWORK.to_string()),
            Some("delete".to_string()),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(
            query,
            Query::Page {
                path: pages::TEACHER_HOMEWORK.to_string(),
                action: PageAction::Delete
            }
        );

        assert!(Query::from_flags(None, None, None, Some("weather".into()), None).is_err());
        assert_eq!(
            Query::from_flags(None, None, None, None, Some("view_logs".into())).unwrap(),
            Query::Special(SpecialPermission::ViewLogs)
        );
    }

    #[test]
    fn test_evaluate_against_defaults() {
        let registry = RoleRegistry::with_defaults();
        let submit = Query::Function(functions::HOMEWORK_SUBMISSION.to_string());
        assert!(evaluate(&registry, roles::STUDENT, &submit));

        let logs = Query::Special(SpecialPermission::ViewLogs);
        assert!(!evaluate(&registry, roles::STUDENT, &logs));
        assert!(evaluate(&registry, roles::MASTER, &logs));
    }

    #[test]
    fn test_tables() {
        let registry = RoleRegistry::with_defaults();
        let roles_out = roles_table(&registry);
        assert_eq!(roles_out.lines().count(), 6);
        assert!(roles_out.contains("manage_roles"));

        let pages_out = pages_table(&registry, roles::STUDENT).unwrap();
        assert!(pages_out.contains(pages::STUDENT_HOMEWORK));
        assert!(!pages_out.contains(pages::ADMIN_LOGS));
        assert!(pages_table(&registry, "parent").is_err());
    }
}
