use proptest::prelude::*;
use yolo_viewer::router::PathTemplate;

mod proptest_helpers;
use proptest_helpers::arb_segment;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn wildcard_binds_segment_verbatim(segment in arb_segment()) {
        let template = PathTemplate::parse("/api/image/{image_id}");
        let params = template
            .matches(&format!("/api/image/{segment}"))
            .expect("single segment matches");
        prop_assert_eq!(params.get("image_id"), Some(segment.as_str()));
    }

    #[test]
    fn different_segment_counts_never_match(
        template_segments in prop::collection::vec(arb_segment(), 0..5),
        path_segments in prop::collection::vec(arb_segment(), 0..5),
        wildcards in prop::collection::vec(any::<bool>(), 5),
    ) {
        prop_assume!(template_segments.len() != path_segments.len());

        let template: Vec<String> = template_segments
            .iter()
            .zip(&wildcards)
            .map(|(seg, wild)| if *wild { format!("{{{seg}}}") } else { seg.clone() })
            .collect();
        let template = PathTemplate::parse(&format!("/{}", template.join("/")));
        let path = format!("/{}", path_segments.join("/"));

        prop_assert!(template.matches(&path).is_none());
    }

    #[test]
    fn literal_template_matches_itself(segments in prop::collection::vec(arb_segment(), 0..5)) {
        let path = format!("/{}/", segments.join("/"));
        let template = PathTemplate::parse(&path);
        let params = template.matches(&path).expect("template matches its own text");
        prop_assert!(params.is_empty());
    }
}
