use std::collections::{BTreeSet, HashMap};

use tracing::{debug, warn};

use crate::error::DispatchError;
use crate::models::route::{normalize_path, Args, Reply, Route};

/// Registered routes, immutable once the app is built.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route, rejecting a second route with the same path and parameter set.
    pub fn register(&mut self, route: Route) -> Result<(), DispatchError> {
        let names = route.param_names();
        if names.len() != route.params.len() {
            let mut seen = BTreeSet::new();
            let param = route
                .params
                .iter()
                .find(|p| !seen.insert(p.name.as_str()))
                .map(|p| p.name.clone())
                .unwrap_or_default();
            return Err(DispatchError::DuplicateParameter {
                path: route.path.clone(),
                param,
            });
        }

        if self.routes.iter().any(|r| r.key() == route.key()) {
            return Err(DispatchError::AmbiguousRoute {
                path: route.path.clone(),
                params: names.into_iter().map(str::to_string).collect(),
            });
        }

        debug!(path = %route.path, params = ?names, "Registered route");
        self.routes.push(route);
        Ok(())
    }

    /// Distinct base paths, in registration order.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        for route in &self.routes {
            if !paths.contains(&route.path.as_str()) {
                paths.push(&route.path);
            }
        }
        paths
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Selects the route whose parameter set equals the query keys exactly,
    /// coerces the values and runs its handler.
    pub fn dispatch(
        &self,
        path: &str,
        query: &HashMap<String, String>,
    ) -> Result<Reply, DispatchError> {
        let path = normalize_path(path);
        let keys: BTreeSet<&str> = query.keys().map(String::as_str).collect();

        let mut candidates = self
            .routes
            .iter()
            .filter(|r| r.path == path && r.param_names() == keys);

        let route = match (candidates.next(), candidates.next()) {
            (Some(route), None) => route,
            (None, _) => {
                let err = DispatchError::NoMatchingRoute {
                    path: path.to_string(),
                    params: keys.iter().map(|k| k.to_string()).collect(),
                };
                warn!(error = %err, "Dispatch failed");
                return Err(err);
            }
            (Some(_), Some(_)) => {
                let err = DispatchError::AmbiguousRoute {
                    path: path.to_string(),
                    params: keys.iter().map(|k| k.to_string()).collect(),
                };
                warn!(error = %err, "Route table holds overlapping routes");
                return Err(err);
            }
        };

        debug!(path = %route.path, params = ?keys, "Matched route");

        let mut values = Vec::with_capacity(route.params.len());
        for param in &route.params {
            // Set equality above guarantees every declared name is present.
            let raw = query.get(&param.name).map(String::as_str).unwrap_or_default();
            let value = param.kind.coerce(&param.name, raw).map_err(|err| {
                warn!(error = %err, "Dispatch failed");
                err
            })?;
            values.push((param.name.clone(), value));
        }

        (route.handler)(Args::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::ParamType;

    fn first(mut args: Args) -> Result<Reply, DispatchError> {
        Ok(Reply::Text(args.text("a")?))
    }

    fn pair(mut args: Args) -> Result<Reply, DispatchError> {
        Ok(Reply::Texts(vec![args.text("a")?, args.text("b")?]))
    }

    fn number(mut args: Args) -> Result<Reply, DispatchError> {
        Ok(Reply::Integer(args.integer("n")?))
    }

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn table() -> RouteTable {
        let mut table = RouteTable::new();
        table
            .register(Route::get("things", first).param("a", ParamType::Text))
            .unwrap();
        table
            .register(
                Route::get("things", pair)
                    .param("a", ParamType::Text)
                    .param("b", ParamType::Text),
            )
            .unwrap();
        table
            .register(Route::get("things", number).param("n", ParamType::Integer))
            .unwrap();
        table
    }

    #[test]
    fn test_exact_set_match() {
        let table = table();
        assert_eq!(
            table.dispatch("things", &query(&[("a", "x")])),
            Ok(Reply::Text("x".to_string()))
        );
        assert_eq!(
            table.dispatch("/things", &query(&[("b", "y"), ("a", "x")])),
            Ok(Reply::Texts(vec!["x".to_string(), "y".to_string()]))
        );
    }

    #[test]
    fn test_subset_and_superset_do_not_match() {
        let table = table();
        for keys in [
            vec![("b", "y")],
            vec![("a", "x"), ("n", "1")],
            vec![("a", "x"), ("b", "y"), ("c", "z")],
            vec![],
        ] {
            assert!(matches!(
                table.dispatch("things", &query(&keys)),
                Err(DispatchError::NoMatchingRoute { .. })
            ));
        }
    }

    #[test]
    fn test_unknown_path() {
        let table = table();
        assert_eq!(
            table.dispatch("dogs", &query(&[("a", "x")])),
            Err(DispatchError::NoMatchingRoute {
                path: "dogs".to_string(),
                params: vec!["a".to_string()],
            })
        );
    }

    #[test]
    fn test_integer_coercion_failure() {
        let table = table();
        assert_eq!(
            table.dispatch("things", &query(&[("n", "many")])),
            Err(DispatchError::ParameterCoercion {
                param: "n".to_string(),
                value: "many".to_string(),
            })
        );
        assert_eq!(
            table.dispatch("things", &query(&[("n", "-7")])),
            Ok(Reply::Integer(-7))
        );
    }

    #[test]
    fn test_register_rejects_same_key() {
        let mut table = table();
        let err = table
            .register(
                Route::get("/things", pair)
                    .param("b", ParamType::Text)
                    .param("a", ParamType::Integer),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::AmbiguousRoute {
                path: "things".to_string(),
                params: vec!["a".to_string(), "b".to_string()],
            }
        );
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_register_rejects_duplicate_parameter() {
        let mut table = RouteTable::new();
        let err = table
            .register(
                Route::get("things", pair)
                    .param("a", ParamType::Text)
                    .param("a", ParamType::Text),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::DuplicateParameter {
                path: "things".to_string(),
                param: "a".to_string(),
            }
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_same_params_on_other_path_is_allowed() {
        let mut table = table();
        table
            .register(Route::get("others", first).param("a", ParamType::Text))
            .unwrap();
        assert_eq!(table.paths(), vec!["things", "others"]);
    }

    #[test]
    fn test_handler_argument_mismatch_surfaces() {
        let mut table = RouteTable::new();
        table
            .register(Route::get("broken", number).param("n", ParamType::Text))
            .unwrap();
        assert_eq!(
            table.dispatch("broken", &query(&[("n", "3")])),
            Err(DispatchError::ArgumentMismatch {
                param: "n".to_string()
            })
        );
    }
}
