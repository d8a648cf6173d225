//! Query helpers shared by the list repositories.

use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};

use campusdesk_core::access::Scope;
use campusdesk_core::listing::LIKE_ESCAPE;

/// Case-insensitive substring match: `lower(column) LIKE pattern ESCAPE '\'`.
///
/// `pattern` comes from [`campusdesk_core::listing::like_pattern`].
pub(crate) fn lower_like<C: IntoColumnRef>(column: C, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// Narrows a query to the records visible in `scope`.
pub(crate) fn scoped<E, C>(query: Select<E>, owner_column: C, scope: Scope) -> Select<E>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    match scope.owner() {
        Some(owner) => query.filter(owner_column.eq(owner)),
        None => query,
    }
}
