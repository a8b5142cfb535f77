/// One clickable segment of the breadcrumb trail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Breadcrumb {
    /// Segment display name.
    pub name: String,
    /// Cumulative path from the root up to and including this segment.
    pub path: String,
}

/// Derives breadcrumb segments from a resolved remote path.
///
/// Empty segments are dropped, so `"/a//b/"` yields the same crumbs as
/// `"/a/b"`. The root itself is not part of the trail; callers offer it as a
/// separate root crumb.
pub fn breadcrumbs(resolved_path: &str) -> Vec<Breadcrumb> {
    let mut crumbs = Vec::new();
    let mut cumulative_path = String::new();

    for segment in resolved_path.split('/').filter(|segment| !segment.is_empty()) {
        cumulative_path.push('/');
        cumulative_path.push_str(segment);
        crumbs.push(Breadcrumb {
            name: segment.to_string(),
            path: cumulative_path.clone(),
        });
    }

    crumbs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crumb(name: &str, path: &str) -> Breadcrumb {
        Breadcrumb {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_breadcrumbs_builds_cumulative_prefixes() {
        // Arrange
        let resolved_path = "/a/b/c";

        // Act
        let crumbs = breadcrumbs(resolved_path);

        // Assert
        assert_eq!(
            crumbs,
            vec![crumb("a", "/a"), crumb("b", "/a/b"), crumb("c", "/a/b/c")]
        );
    }

    #[test]
    fn test_breadcrumbs_is_empty_for_root() {
        // Arrange
        let resolved_path = "/";

        // Act
        let crumbs = breadcrumbs(resolved_path);

        // Assert
        assert!(crumbs.is_empty());
    }

    #[test]
    fn test_breadcrumbs_drops_empty_segments() {
        // Arrange
        let resolved_path = "//home//user/";

        // Act
        let crumbs = breadcrumbs(resolved_path);

        // Assert
        assert_eq!(
            crumbs,
            vec![crumb("home", "/home"), crumb("user", "/home/user")]
        );
    }

    #[test]
    fn test_breadcrumbs_is_empty_before_first_listing() {
        // Arrange
        let resolved_path = "";

        // Act
        let crumbs = breadcrumbs(resolved_path);

        // Assert
        assert_eq!(crumbs, Vec::new());
    }
}
