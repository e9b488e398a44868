/// The route set served by the registration API, keyed by the gateway's
/// combined method+path route key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ListUsers,
    ListStates,
    ListAffiliations,
    CreateUser,
}

impl Route {
    /// Matches a route key exactly; anything else is unsupported and must be
    /// reported back with the offending key.
    pub fn parse(route_key: &str) -> Option<Self> {
        match route_key {
            "GET /users" => Some(Self::ListUsers),
            "GET /states" => Some(Self::ListStates),
            "GET /affiliations" => Some(Self::ListAffiliations),
            "POST /users" => Some(Self::CreateUser),
            _ => None,
        }
    }
}
