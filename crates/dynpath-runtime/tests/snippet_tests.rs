use dynpath_runtime::{commonjs_source, initializer_source, DEFAULT_INITIALIZER};

#[test]
fn test_default_initializer_snapshot() {
    insta::assert_snapshot!(initializer_source(DEFAULT_INITIALIZER), @r#"
    function setPath(entry) {
      const { __MAP__, __ENVIRONMENT__ } = window;
      const { href } = __MAP__[entry][__ENVIRONMENT__];
      return href + "/";
    }
    "#);
}

#[test]
fn test_commonjs_snapshot() {
    insta::assert_snapshot!(commonjs_source(), @r#"
    module.exports = function (entry) {
      const { __MAP__, __ENVIRONMENT__ } = window;
      const { href } = __MAP__[entry][__ENVIRONMENT__];
      return href + "/";
    };
    "#);
}
