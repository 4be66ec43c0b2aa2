//! Experiment endpoint handlers: resolve variables, validate, run, respond.

use serde::Serialize;
use tracing::info;

use ol_experiments::{resolve_dimensions, run_search, sample, SampleMethod, SearchConfig};
use ol_store::{RunStore, VariableStore};
use ol_types::{
    domain_snapshot, validation_error, NewRun, OlResult, RunRecord, RunType, VariableId,
};

use crate::models::{
    DoeMeta, DoeRequest, DoeResponse, OptimizeMeta, OptimizeRequest, OptimizeResponse,
    MAX_REQUEST_POINTS,
};

fn check_request_size(field: &str, value: usize) -> OlResult<()> {
    if value == 0 || value > MAX_REQUEST_POINTS {
        return Err(validation_error!(
            "{field} must be between 1 and {MAX_REQUEST_POINTS}, got {value}"
        ));
    }
    Ok(())
}

fn check_variable_ids(req_ids: &[VariableId]) -> OlResult<()> {
    if req_ids.is_empty() {
        return Err(validation_error!("variable_ids must not be empty"));
    }
    Ok(())
}

/// Generate a DOE design within strict variable domain constraints.
pub async fn run_doe(variables: &dyn VariableStore, req: &DoeRequest) -> OlResult<DoeResponse> {
    check_variable_ids(&req.variable_ids)?;
    check_request_size("n_points", req.n_points)?;

    let records = variables.resolve(&req.variable_ids).await?;
    let dimensions = resolve_dimensions(&req.variable_ids, &records)?;
    let points = sample(&dimensions, req.n_points, req.method.into(), req.seed)?;

    info!(
        n_points = points.len(),
        dims = dimensions.len(),
        method = ?req.method,
        "generated DOE design"
    );

    Ok(DoeResponse {
        method: req.method,
        n_points: req.n_points,
        variable_ids: req.variable_ids.clone(),
        points,
        meta: DoeMeta {
            variable_order: dimensions.iter().map(|d| d.id).collect(),
            domain: domain_snapshot(&dimensions),
        },
    })
}

/// Run seeded random search and report the best point seen.
pub async fn run_optimize(
    variables: &dyn VariableStore,
    req: &OptimizeRequest,
) -> OlResult<OptimizeResponse> {
    check_variable_ids(&req.variable_ids)?;
    check_request_size("n_iter", req.n_iter)?;

    let records = variables.resolve(&req.variable_ids).await?;
    let dimensions = resolve_dimensions(&req.variable_ids, &records)?;

    let config = SearchConfig {
        n_iter: req.n_iter,
        method: SampleMethod::UniformRandom,
        seed: req.seed,
        max_seed_points: req.max_initial_points,
    };
    let result = run_search(&dimensions, &req.objective, &req.initial_points, &config)?;

    info!(
        n_iter = req.n_iter,
        initial_points = result.meta.seed_points_used,
        best_score = result.best_score,
        "optimize run complete"
    );

    Ok(OptimizeResponse {
        method: req.method,
        n_iter: req.n_iter,
        variable_ids: req.variable_ids.clone(),
        best_point: result.best_point,
        history: result.history,
        meta: OptimizeMeta {
            objective: result.meta.objective,
            best_score: result.best_score,
            initial_points_used: result.meta.seed_points_used,
            max_initial_points: result.meta.max_seed_points,
            variable_order: result.meta.variable_order,
            domain: result.meta.domain,
        },
    })
}

/// Persist a request/response pair for history. The experiment handlers do
/// not call this themselves; persistence is the caller's choice.
pub async fn record_run<Req, Resp>(
    runs: &dyn RunStore,
    run_type: RunType,
    title: Option<String>,
    request: &Req,
    response: &Resp,
) -> OlResult<RunRecord>
where
    Req: Serialize,
    Resp: Serialize,
{
    let new = NewRun {
        run_type,
        title,
        request_json: serde_json::to_value(request)?,
        response_json: serde_json::to_value(response)?,
    };
    runs.create(new).await
}
