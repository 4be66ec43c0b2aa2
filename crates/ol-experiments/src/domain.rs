//! Strict domain validation for experiment requests.

use std::collections::{HashMap, HashSet};

use ol_types::{Dimension, DomainError, VariableId, VariableRecord};

/// Resolve an ordered id list against store records into validated dimensions.
///
/// `records` may arrive in any order; the output follows `variable_ids`.
/// Checks, in order: duplicate ids, unknown ids, missing or non-finite
/// bounds, inverted bounds. A zero-width domain (`min == max`) is accepted.
/// Pure predicate over its inputs, no side effects.
pub fn resolve_dimensions(
    variable_ids: &[VariableId],
    records: &[VariableRecord],
) -> Result<Vec<Dimension>, DomainError> {
    let mut seen = HashSet::with_capacity(variable_ids.len());
    let mut duplicates = Vec::new();
    for id in variable_ids {
        if !seen.insert(*id) && !duplicates.contains(id) {
            duplicates.push(*id);
        }
    }
    if !duplicates.is_empty() {
        return Err(DomainError::DuplicateIds { ids: duplicates });
    }

    let by_id: HashMap<VariableId, &VariableRecord> =
        records.iter().map(|r| (r.id, r)).collect();

    let missing: Vec<VariableId> = variable_ids
        .iter()
        .filter(|id| !by_id.contains_key(id))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::UnknownIds { missing });
    }

    let mut unbounded = Vec::new();
    let mut inverted = Vec::new();
    let mut dimensions = Vec::with_capacity(variable_ids.len());
    for id in variable_ids {
        let record = by_id[id];
        match (record.min_value, record.max_value) {
            (Some(lower), Some(upper)) if lower.is_finite() && upper.is_finite() => {
                if lower > upper {
                    inverted.push(*id);
                } else {
                    dimensions.push(Dimension {
                        id: *id,
                        lower,
                        upper,
                        unit: record.unit.clone(),
                    });
                }
            }
            _ => unbounded.push(*id),
        }
    }
    if !unbounded.is_empty() {
        return Err(DomainError::UnboundedDomain { ids: unbounded });
    }
    if !inverted.is_empty() {
        return Err(DomainError::InvertedDomain { ids: inverted });
    }

    Ok(dimensions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, min: Option<f64>, max: Option<f64>) -> VariableRecord {
        VariableRecord {
            id: VariableId(id),
            name: format!("var_{id}"),
            min_value: min,
            max_value: max,
            unit: None,
        }
    }

    #[test]
    fn resolves_in_request_order() {
        let records = vec![
            record(2, Some(-1.0), Some(1.0)),
            record(1, Some(0.0), Some(10.0)),
        ];
        let dims =
            resolve_dimensions(&[VariableId(1), VariableId(2)], &records).unwrap();
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].id, VariableId(1));
        assert_eq!(dims[0].lower, 0.0);
        assert_eq!(dims[1].id, VariableId(2));
        assert_eq!(dims[1].upper, 1.0);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let records = vec![record(5, Some(0.0), Some(1.0))];
        let err = resolve_dimensions(&[VariableId(5), VariableId(5)], &records).unwrap_err();
        match err {
            DomainError::DuplicateIds { ids } => assert_eq!(ids, vec![VariableId(5)]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_ids() {
        let records = vec![record(1, Some(0.0), Some(1.0))];
        let err =
            resolve_dimensions(&[VariableId(1), VariableId(9), VariableId(4)], &records)
                .unwrap_err();
        match err {
            DomainError::UnknownIds { missing } => {
                assert_eq!(missing, vec![VariableId(9), VariableId(4)]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_bounds_citing_ids() {
        let records = vec![
            record(1, Some(0.0), Some(1.0)),
            record(2, None, Some(1.0)),
            record(3, Some(0.0), None),
        ];
        let err = resolve_dimensions(
            &[VariableId(1), VariableId(2), VariableId(3)],
            &records,
        )
        .unwrap_err();
        match err {
            DomainError::UnboundedDomain { ids } => {
                assert_eq!(ids, vec![VariableId(2), VariableId(3)]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_finite_bounds() {
        let records = vec![record(1, Some(f64::NEG_INFINITY), Some(1.0))];
        let err = resolve_dimensions(&[VariableId(1)], &records).unwrap_err();
        assert!(matches!(err, DomainError::UnboundedDomain { .. }));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let records = vec![record(1, Some(5.0), Some(-5.0))];
        let err = resolve_dimensions(&[VariableId(1)], &records).unwrap_err();
        match err {
            DomainError::InvertedDomain { ids } => assert_eq!(ids, vec![VariableId(1)]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_zero_width_domain() {
        let records = vec![record(1, Some(3.0), Some(3.0))];
        let dims = resolve_dimensions(&[VariableId(1)], &records).unwrap();
        assert_eq!(dims[0].lower, 3.0);
        assert_eq!(dims[0].upper, 3.0);
    }

    #[test]
    fn duplicate_check_runs_before_unknown_check() {
        // Both problems present; duplicates win.
        let err = resolve_dimensions(&[VariableId(8), VariableId(8)], &[]).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateIds { .. }));
    }
}
