use url::{ParseError, Url};

/// Resolves a reference found in markup against the page URL.
///
/// Absolute references come back as parsed; relative ones are joined onto
/// `base`. Anything that cannot be turned into a URL is returned unchanged,
/// so callers must accept output that is not a valid absolute URL.
pub fn resolve(reference: &str, base: &str) -> String {
    match Url::parse(reference) {
        Ok(absolute) => absolute.into(),
        Err(ParseError::RelativeUrlWithoutBase) if is_relative_reference(reference) => {
            Url::parse(base)
                .and_then(|base| base.join(reference))
                .map(String::from)
                .unwrap_or_else(|e| {
                    ::log::trace!("Keeping unresolved reference {:?}: {}", reference, e);
                    reference.to_string()
                })
        }
        Err(e) => {
            ::log::trace!("Keeping unresolved reference {:?}: {}", reference, e);
            reference.to_string()
        }
    }
}

/// A scheme-less reference may not carry a colon in its first path segment
/// (RFC 3986 `path-noscheme`), otherwise it is a mangled absolute URL.
fn is_relative_reference(reference: &str) -> bool {
    let first_segment = reference
        .trim()
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    !first_segment.contains(':')
}

/// Path component of a (possibly unresolved) reference, without query or fragment
pub fn reference_path(reference: &str) -> String {
    match Url::parse(reference) {
        Ok(url) => url.path().to_string(),
        Err(_) => reference
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
