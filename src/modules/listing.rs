//! Shared list-page query: search, relation filters, sort and pagination.
//!
//! Each entity describes its list page with a [`ListQuery`] and adds its own
//! relation filters through a closure that pushes `AND ...` conditions. The
//! same conditions are applied to the count and to the page query.

use schoolboard_core::{ListParams, Paginated, PaginationMeta};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, postgres::PgRow};

pub struct ListQuery {
    /// Select list, e.g. `SELECT t.*`
    pub select: &'static str,
    /// `FROM` clause including joins, e.g. `FROM teachers t`
    pub from: &'static str,
    /// Columns matched by `search` with `ILIKE`
    pub search: &'static [&'static str],
    /// `(sort key, column)` pairs accepted in `sort`
    pub sortable: &'static [(&'static str, &'static str)],
    pub default_sort: &'static str,
    /// Appended after the sort column so paging is stable
    pub tiebreak: &'static str,
}

impl ListQuery {
    pub async fn fetch<T, F>(
        &self,
        db: &PgPool,
        params: &ListParams,
        filters: F,
    ) -> Result<Paginated<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
        F: Fn(&mut QueryBuilder<'_, Postgres>),
    {
        let pagination = params.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) ");
        count.push(self.from);
        self.push_conditions(&mut count, params, &filters);
        let total = count.build_query_scalar::<i64>().fetch_one(db).await?;

        let mut page = QueryBuilder::new(self.select);
        page.push(" ").push(self.from);
        self.push_conditions(&mut page, params, &filters);
        page.push(format!(
            " ORDER BY {} {}, {}",
            params.sort_column(self.sortable, self.default_sort),
            params.order().as_sql(),
            self.tiebreak
        ));
        page.push(" LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let data = page.build_query_as::<T>().fetch_all(db).await?;

        Ok(Paginated {
            data,
            meta: PaginationMeta::new(total, &pagination),
        })
    }

    fn push_conditions<F>(&self, builder: &mut QueryBuilder<'_, Postgres>, params: &ListParams, filters: &F)
    where
        F: Fn(&mut QueryBuilder<'_, Postgres>),
    {
        builder.push(" WHERE TRUE");

        if let Some(pattern) = params.search_pattern()
            && !self.search.is_empty()
        {
            builder.push(" AND (");
            for (i, column) in self.search.iter().enumerate() {
                if i > 0 {
                    builder.push(" OR ");
                }
                builder.push(*column).push(" ILIKE ").push_bind(pattern.clone());
            }
            builder.push(")");
        }

        filters(builder);
    }
}
