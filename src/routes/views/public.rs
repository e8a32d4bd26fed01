use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::State, http::StatusCode, response::Html, routing::get};
use chrono::Local;

use crate::{
    query_api::{extract_sql, placeholder},
    schema::Schema,
    session::DatabaseEngine,
    state::AppState,
    stats::SchemaReport,
};

const PROJECT_NAME: &str = "QueryGraph";

struct TypeRow {
    tag: String,
    count: usize,
}

struct TableRow {
    name: String,
    rows: u64,
    columns: usize,
    primary_keys: usize,
    foreign_keys: usize,
    types: String,
}

struct RelationshipRow {
    name: String,
    incoming: usize,
    outgoing: usize,
    total: usize,
}

struct MatrixRow {
    name: String,
    cells: Vec<String>,
}

struct LinkRow {
    source: String,
    target: String,
}

struct SizeRow {
    name: String,
    rows: u64,
    columns: usize,
    kib: String,
    percent: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    now: String,
    project_name: &'static str,
    homepage_query: &'static str,
    homepage_sql: &'static str,
    converter_query: &'static str,
    converter_sql: String,
    engines: Vec<&'static str>,
}

#[derive(Template)]
#[template(path = "schema.html")]
struct SchemaTemplate {
    now: String,
    project_name: &'static str,
    table_match: &'static str,
    table_count: usize,
    column_count: usize,
    relationship_count: usize,
    type_rows: Vec<TypeRow>,
    table_rows: Vec<TableRow>,
    relationship_rows: Vec<RelationshipRow>,
    matrix_header: Vec<String>,
    matrix_rows: Vec<MatrixRow>,
    links: Vec<LinkRow>,
    size_rows: Vec<SizeRow>,
}

impl SchemaTemplate {
    fn build(schema: &Schema, report: SchemaReport, table_match: &'static str) -> Self {
        let type_rows = report
            .column_types
            .iter()
            .map(|(tag, count)| TypeRow {
                tag: tag.to_string(),
                count,
            })
            .collect();

        let table_rows = report
            .tables
            .iter()
            .zip(&schema.tables)
            .map(|(stats, table)| TableRow {
                name: stats.name.clone(),
                rows: table.row_count,
                columns: stats.column_count,
                primary_keys: stats.primary_keys,
                foreign_keys: stats.foreign_keys,
                types: stats
                    .type_counts
                    .iter()
                    .map(|(tag, count)| format!("{tag}: {count}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            })
            .collect();

        let relationship_rows = report
            .relationship_counts
            .into_iter()
            .map(|count| RelationshipRow {
                name: count.name,
                incoming: count.incoming,
                outgoing: count.outgoing,
                total: count.total,
            })
            .collect();

        let matrix = report.relationship_matrix;
        let matrix_rows = matrix
            .tables
            .iter()
            .zip(&matrix.cells)
            .map(|(name, cells)| MatrixRow {
                name: name.clone(),
                cells: cells
                    .iter()
                    .map(|&n| if n > 0 { n.to_string() } else { "-".to_string() })
                    .collect(),
            })
            .collect();

        let links = report
            .relationships
            .into_iter()
            .map(|detail| LinkRow {
                source: detail.from,
                target: detail.to,
            })
            .collect();

        let size_rows = report
            .size_ranking
            .iter()
            .zip(&report.size_shares)
            .map(|(size, share)| SizeRow {
                name: size.name.clone(),
                rows: size.row_count,
                columns: size.column_count,
                kib: format!("{:.2}", size.estimated_kib()),
                percent: format!("{:.1}", share.percent),
            })
            .collect();

        Self {
            now: Local::now().to_rfc3339(),
            project_name: PROJECT_NAME,
            table_match,
            table_count: report.table_count,
            column_count: report.column_count,
            relationship_count: report.relationship_count,
            type_rows,
            table_rows,
            relationship_rows,
            matrix_header: matrix.tables,
            matrix_rows,
            links,
            size_rows,
        }
    }
}

type HtmlError = (StatusCode, Html<String>);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/schema", get(schema_view))
        .with_state(state)
}

async fn index() -> Result<Html<String>, HtmlError> {
    let rendered = IndexTemplate {
        now: Local::now().to_rfc3339(),
        project_name: PROJECT_NAME,
        homepage_query: placeholder::HOMEPAGE_QUERY,
        homepage_sql: placeholder::HOMEPAGE_SQL,
        converter_query: placeholder::CONVERTER_QUERY,
        converter_sql: extract_sql(placeholder::CONVERTER_GENERATED).trim().to_string(),
        engines: DatabaseEngine::ALL.iter().map(|e| e.as_str()).collect(),
    }
    .render()
    .map_err(|_| html_error(StatusCode::INTERNAL_SERVER_ERROR, "failed to render index"))?;
    Ok(Html(rendered))
}

async fn schema_view(State(state): State<Arc<AppState>>) -> Result<Html<String>, HtmlError> {
    let schema = Schema::sample();
    let report = state.stats.report(&schema);
    let rendered = SchemaTemplate::build(&schema, report, state.stats.table_match().as_str())
        .render()
        .map_err(|err| {
            tracing::error!(error = %err, "schema template failed");
            html_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to render schema report",
            )
        })?;
    Ok(Html(rendered))
}

fn html_error(status: StatusCode, message: &'static str) -> HtmlError {
    (status, Html(message.to_string()))
}
