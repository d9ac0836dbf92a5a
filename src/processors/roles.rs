use crate::models::AppError;

/// 発注処理で参照する列（列名で保持する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    pub requested: String,
    pub supplier: String,
    pub current: Option<String>,
}

/// 列名から各役割の列を決定する
pub trait RoleResolver {
    fn resolve(&self, columns: &[String]) -> Result<ColumnRoles, AppError>;
}

/// 列名に含まれるキーワードで役割を判定する（大文字小文字を区別せず、最初に一致した列）
#[derive(Debug, Clone)]
pub struct KeywordRoleResolver {
    pub requested: String,
    pub supplier: String,
    pub current: String,
}

impl Default for KeywordRoleResolver {
    fn default() -> Self {
        Self {
            requested: "requested".to_string(),
            supplier: "supplier".to_string(),
            current: "current".to_string(),
        }
    }
}

impl RoleResolver for KeywordRoleResolver {
    fn resolve(&self, columns: &[String]) -> Result<ColumnRoles, AppError> {
        let requested = find_column(columns, &self.requested)
            .ok_or_else(|| AppError::ColumnNotFound(self.requested.clone()))?;
        let supplier = find_column(columns, &self.supplier)
            .ok_or_else(|| AppError::ColumnNotFound(self.supplier.clone()))?;
        // 現在庫列は任意
        let current = find_column(columns, &self.current);

        log::debug!(
            "resolved roles: requested={:?} supplier={:?} current={:?}",
            requested,
            supplier,
            current
        );

        Ok(ColumnRoles {
            requested,
            supplier,
            current,
        })
    }
}

fn find_column(columns: &[String], keyword: &str) -> Option<String> {
    let keyword = keyword.to_lowercase();
    columns
        .iter()
        .find(|name| name.to_lowercase().contains(&keyword))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_resolve_all_roles() {
        let roles = KeywordRoleResolver::default()
            .resolve(&columns(&[
                "Item",
                "Current Stock",
                "REQUESTED Qty",
                "Preferred Supplier",
            ]))
            .unwrap();
        assert_eq!(roles.requested, "REQUESTED Qty");
        assert_eq!(roles.supplier, "Preferred Supplier");
        assert_eq!(roles.current.as_deref(), Some("Current Stock"));
    }

    #[test]
    fn test_first_match_wins() {
        let roles = KeywordRoleResolver::default()
            .resolve(&columns(&["Supplier", "Backup Supplier", "Requested", "Requested 2"]))
            .unwrap();
        assert_eq!(roles.supplier, "Supplier");
        assert_eq!(roles.requested, "Requested");
    }

    #[test]
    fn test_current_is_optional() {
        let roles = KeywordRoleResolver::default()
            .resolve(&columns(&["Requested", "Supplier"]))
            .unwrap();
        assert!(roles.current.is_none());
    }

    #[test]
    fn test_missing_required_roles() {
        let resolver = KeywordRoleResolver::default();
        let err = resolver.resolve(&columns(&["Item", "Supplier"])).unwrap_err();
        assert!(matches!(err, AppError::ColumnNotFound(ref role) if role == "requested"));

        let err = resolver.resolve(&columns(&["Item", "Requested"])).unwrap_err();
        assert!(matches!(err, AppError::ColumnNotFound(ref role) if role == "supplier"));
    }
}
