//! Naming for hops that never answered.
//!
//! Route producers report a silent hop as `*`. Left alone, every silent hop in
//! every route would be the same vertex. Expanding a hop names it after the
//! run of entries around it up to the nearest known hop on each side, so
//! `foo, *, *, bar` becomes `foo|*|*,bar` and `foo,*|*|bar`.

pub const UNKNOWN_HOP: &str = "*";

/// True for raw `*` hops and for names produced by [`expand_unknown_hops`]
pub fn is_unknown_hop(name: &str) -> bool {
    name.contains(UNKNOWN_HOP)
}

pub fn expand_unknown_hops(path: &[String]) -> Vec<String> {
    path.iter()
        .enumerate()
        .map(|(i, hop)| {
            if hop != UNKNOWN_HOP {
                return hop.clone();
            }

            let mut prefix = Vec::new();
            for earlier in path[..i].iter().rev() {
                prefix.push(earlier.as_str());
                if earlier != UNKNOWN_HOP {
                    break;
                }
            }
            prefix.reverse();

            let mut suffix = Vec::new();
            for later in &path[i + 1..] {
                suffix.push(later.as_str());
                if later != UNKNOWN_HOP {
                    break;
                }
            }

            format!("{}|{}|{}", prefix.join(","), UNKNOWN_HOP, suffix.join(","))
        })
        .collect()
}
