//! Per-solver convergence series extracted from a group

use super::{ChartError, ChartResult};
use crate::grouping::Group;
use crate::table::{distinct, Row};

pub(super) const SOLVER: &str = "solver_name";
pub(super) const TIME: &str = "time";
pub(super) const OBJECTIVE_VALUE: &str = "objective_value";
pub(super) const STOP_VAL: &str = "stop_val";

/// Offset keeping suboptimality strictly positive on log axes
pub(super) const EPS: f64 = 1e-10;

/// (time, objective value) points of one solver, sorted by time
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Series {
    pub solver: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn final_time(&self) -> Option<f64> {
        self.points.last().map(|p| p.0)
    }

    pub fn initial_value(&self) -> Option<f64> {
        self.points.first().map(|p| p.1)
    }
}

/// One series per solver, in order of first appearance
///
/// Rows sharing a `stop_val` (repetitions) collapse into a single point at
/// the median time and median objective value.
pub(super) fn solver_series(group: &Group<'_>) -> ChartResult<Vec<Series>> {
    let solvers = distinct(group.rows.iter().map(|r| r.get(SOLVER).unwrap_or_default()));
    if group.rows.iter().any(|r| r.get(SOLVER).is_none()) {
        return Err(ChartError::MissingField(SOLVER));
    }

    let mut all = Vec::with_capacity(solvers.len());
    for solver in solvers {
        let rows: Vec<&Row> = group
            .rows
            .iter()
            .copied()
            .filter(|r| r.get(SOLVER) == Some(solver.as_str()))
            .collect();

        let mut points = match rows.first().and_then(|r| r.get(STOP_VAL)) {
            Some(_) => by_stop_value(&rows)?,
            None => rows
                .iter()
                .map(|r| measurement(r))
                .collect::<ChartResult<Vec<_>>>()?,
        };
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        all.push(Series { solver, points });
    }

    if all.iter().all(|s| s.points.is_empty()) {
        return Err(ChartError::NoData);
    }
    Ok(all)
}

/// Best objective value reached by any solver in the group
pub(super) fn best_value(series: &[Series]) -> Option<f64> {
    series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.1))
        .min_by(|a, b| a.total_cmp(b))
}

/// Time of every row, grouped by solver
pub(super) fn solver_times(group: &Group<'_>) -> ChartResult<Vec<(String, Vec<f64>)>> {
    let solvers = distinct(group.rows.iter().map(|r| r.get(SOLVER).unwrap_or_default()));
    solvers
        .into_iter()
        .map(|solver| {
            let times = group
                .rows
                .iter()
                .filter(|r| r.get(SOLVER).unwrap_or_default() == solver)
                .map(|r| r.number(TIME).ok_or(ChartError::MissingField(TIME)))
                .collect::<ChartResult<Vec<_>>>()?;
            Ok((solver, times))
        })
        .collect()
}

fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}

fn measurement(row: &Row) -> ChartResult<(f64, f64)> {
    let time = row.number(TIME).ok_or(ChartError::MissingField(TIME))?;
    let value = row
        .number(OBJECTIVE_VALUE)
        .ok_or(ChartError::MissingField(OBJECTIVE_VALUE))?;
    Ok((time, value))
}

fn by_stop_value(rows: &[&Row]) -> ChartResult<Vec<(f64, f64)>> {
    let stops = distinct(rows.iter().map(|r| r.get(STOP_VAL).unwrap_or_default()));
    let mut points = Vec::with_capacity(stops.len());
    for stop in stops {
        let mut times = Vec::new();
        let mut values = Vec::new();
        for row in rows.iter().filter(|r| r.get(STOP_VAL) == Some(stop.as_str())) {
            let (time, value) = measurement(row)?;
            times.push(time);
            values.push(value);
        }
        if let (Some(t), Some(v)) = (median(&mut times), median(&mut values)) {
            points.push((t, v));
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::Group;
    use crate::table::parse;

    #[test]
    fn repetitions_collapse_to_medians() {
        let table = parse(
            "data_name,objective_name,solver_name,stop_val,idx_rep,time,objective_value\n\
             A,o,sgd,1,0,1.0,10.0\n\
             A,o,sgd,1,1,3.0,14.0\n\
             A,o,sgd,2,0,4.0,5.0\n\
             A,o,adam,1,0,0.5,8.0\n",
        );
        let group = Group::new("A", "o", table.rows().iter().collect());
        let series = solver_series(&group).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].solver, "sgd");
        assert_eq!(series[0].points, vec![(2.0, 12.0), (4.0, 5.0)]);
        assert_eq!(series[1].points, vec![(0.5, 8.0)]);
        assert_eq!(best_value(&series), Some(5.0));
    }

    #[test]
    fn rows_without_stop_value_are_points() {
        let table = parse(
            "data_name,objective_name,solver_name,time,objective_value\n\
             A,o,sgd,2.0,3.0\n\
             A,o,sgd,1.0,4.0\n",
        );
        let group = Group::new("A", "o", table.rows().iter().collect());
        let series = solver_series(&group).unwrap();
        assert_eq!(series[0].points, vec![(1.0, 4.0), (2.0, 3.0)]);
        assert_eq!(series[0].initial_value(), Some(4.0));
        assert_eq!(series[0].final_time(), Some(2.0));
    }

    #[test]
    fn missing_solver_column_is_reported() {
        let table = parse("data_name,objective_name,time\nA,o,1.0\n");
        let group = Group::new("A", "o", table.rows().iter().collect());
        assert!(matches!(
            solver_series(&group),
            Err(ChartError::MissingField(SOLVER))
        ));
    }

    #[test]
    fn median_of_even_count_averages() {
        assert_eq!(median(&mut [4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&mut Vec::new()), None);
    }
}
