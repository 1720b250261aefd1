use crate::repolist::Repository;

/// Most starred first. The sort is stable, so equal counts keep input order.
pub fn rank(repos: &mut [Repository]) {
    repos.sort_by(|a, b| b.stars.cmp(&a.stars));
}
