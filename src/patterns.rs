//! Pattern library for synthetic JavaScript generation
//!
//! Each [`PatternKind`] emits one self-contained JavaScript fragment. The set
//! deliberately mixes clean modern code with legacy mistakes (loose equality,
//! `var` re-declaration, `eval`, closures over loop variables, unused
//! bindings) so linters have a known issue surface to report on.
//!
//! Top-level identifiers are namespaced with the fragment position and/or the
//! file seed. Positions strictly increase within one file, so no two fragments
//! of the same file declare the same top-level name.

use std::fmt;

use crate::fragment::SourceFragment;

/// One category of generated code
///
/// The order of [`PatternKind::ALL`] is part of the output contract: the
/// composer indexes into it, so reordering changes every generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Plain function, arrow function, `var`/`let` pair
    BasicFunctions,
    /// ES6 class with a static factory
    Classes,
    /// Object-literal module exported via `module.exports`
    Modules,
    /// async/await with a Promise wrapper
    AsyncCode,
    /// filter/map/reduce pipeline plus `eval`
    ArrayOperations,
    /// Nested object, destructuring, deep clone, `defineProperty`
    ObjectManipulation,
    /// try/catch with a re-declared `var` and a loop closure bug
    ErrorHandling,
    /// debounce and memoize helpers
    UtilityFunctions,
}

impl PatternKind {
    /// All pattern kinds in rotation order
    pub const ALL: [PatternKind; 8] = [
        PatternKind::BasicFunctions,
        PatternKind::Classes,
        PatternKind::Modules,
        PatternKind::AsyncCode,
        PatternKind::ArrayOperations,
        PatternKind::ObjectManipulation,
        PatternKind::ErrorHandling,
        PatternKind::UtilityFunctions,
    ];

    /// Number of pattern kinds in the rotation
    pub const COUNT: usize = Self::ALL.len();

    /// Pattern at `index`, wrapping around the rotation
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    /// Position of this kind within [`PatternKind::ALL`]
    pub fn index(self) -> usize {
        match self {
            PatternKind::BasicFunctions => 0,
            PatternKind::Classes => 1,
            PatternKind::Modules => 2,
            PatternKind::AsyncCode => 3,
            PatternKind::ArrayOperations => 4,
            PatternKind::ObjectManipulation => 5,
            PatternKind::ErrorHandling => 6,
            PatternKind::UtilityFunctions => 7,
        }
    }

    /// Stable kebab-case name, used in logs and reports
    pub fn name(self) -> &'static str {
        match self {
            PatternKind::BasicFunctions => "basic-functions",
            PatternKind::Classes => "classes",
            PatternKind::Modules => "modules",
            PatternKind::AsyncCode => "async-code",
            PatternKind::ArrayOperations => "array-operations",
            PatternKind::ObjectManipulation => "object-manipulation",
            PatternKind::ErrorHandling => "error-handling",
            PatternKind::UtilityFunctions => "utility-functions",
        }
    }

    /// Generate this pattern's fragment for a position within a file
    ///
    /// Total over all inputs: the combined `position + seed` tag is computed
    /// in `u128` so it never overflows.
    pub fn generate(self, position: u64, seed: u64) -> SourceFragment {
        let text = match self {
            PatternKind::BasicFunctions => basic_functions(position, seed),
            PatternKind::Classes => classes(position, seed),
            PatternKind::Modules => modules(position, seed),
            PatternKind::AsyncCode => async_code(position, seed),
            PatternKind::ArrayOperations => array_operations(position, seed),
            PatternKind::ObjectManipulation => object_manipulation(position, seed),
            PatternKind::ErrorHandling => error_handling(position),
            PatternKind::UtilityFunctions => utility_functions(position),
        };
        SourceFragment::new(text)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn tag(position: u64, seed: u64) -> u128 {
    u128::from(position) + u128::from(seed)
}

fn basic_functions(position: u64, seed: u64) -> String {
    let name = format!("function{}", tag(position, seed));
    format!(
        r#"function {name}(param1, param2) {{
  const result = param1 + param2;
  if (result > 10) {{
    return result * 2;
  }} else {{
    return result;
  }}
}}

const {name}Arrow = (a, b) => {{
  return a * b + Math.random();
}};

// This is a comment that might trigger some linting rules
var oldStyleVar{position} = "{name}";
let modernLet{position} = oldStyleVar{position}.toUpperCase();"#
    )
}

fn classes(position: u64, seed: u64) -> String {
    let name = format!("TestClass{}", tag(position, seed));
    format!(
        r#"class {name} {{
  constructor(name, value) {{
    this.name = name;
    this.value = value;
    this.id = Math.random().toString(36).substr(2, 9);
  }}

  getValue() {{
    return this.value;
  }}

  setValue(newValue) {{
    this.value = newValue;
    return this;
  }}

  static createDefault() {{
    return new {name}('default', 0);
  }}
}}

const instance{position} = new {name}('test', {seed});"#
    )
}

fn modules(position: u64, seed: u64) -> String {
    let name = format!("module{}", tag(position, seed));
    format!(
        r#"const {name} = {{
  name: '{name}',
  version: '1.0.0',

  init() {{
    console.log('Initializing ' + this.name);
  }},

  process(data) {{
    if (!data) {{
      throw new Error('Data is required');
    }}
    return data.map(item => item * 2);
  }},

  cleanup() {{
    // Cleanup logic here
    this.name = null;
  }}
}};

module.exports = {name};"#
    )
}

fn async_code(position: u64, seed: u64) -> String {
    let name = format!("asyncFunction{}", tag(position, seed));
    let delay = seed % 100;
    format!(
        r#"async function {name}() {{
  try {{
    const result = await new Promise((resolve, reject) => {{
      setTimeout(() => {{
        if (Math.random() > 0.1) {{
          resolve('success');
        }} else {{
          reject(new Error('Random failure'));
        }}
      }}, {delay});
    }});

    return result;
  }} catch (error) {{
    console.error('Error in {name}:', error);
    throw error;
  }}
}}

const {name}Arrow = async (param) => {{
  const data = await fetch('/api/data/' + param);
  return data.json();
}};"#
    )
}

fn array_operations(position: u64, seed: u64) -> String {
    let length = seed % 20 + 5;
    format!(
        r#"const array{position} = Array.from({{ length: {length} }}, (_, i) => i * 2);

const processed{position} = array{position}
  .filter(item => item > 5)
  .map(item => ({{ value: item, squared: item * item }}))
  .reduce((acc, curr) => {{
    acc.sum += curr.value;
    acc.sumSquared += curr.squared;
    return acc;
  }}, {{ sum: 0, sumSquared: 0 }});

const sorted{position} = [...array{position}].sort((a, b) => b - a);

// Some potentially problematic patterns
var global{position} = processed{position};
eval('console.log("eval usage");');"#
    )
}

fn object_manipulation(position: u64, seed: u64) -> String {
    format!(
        r#"const obj{position} = {{
  id: {seed},
  name: 'Object {position}',
  nested: {{
    level1: {{
      level2: {{
        value: 'deep value'
      }}
    }}
  }}
}};

const {{ name: nameOf{position}, nested: {{ level1: level1Of{position} }} }} = obj{position};

const cloned{position} = JSON.parse(JSON.stringify(obj{position}));
cloned{position}.modified = true;

Object.defineProperty(obj{position}, 'computed', {{
  get() {{
    return this.id * 10;
  }}
}});"#
    )
}

fn error_handling(position: u64) -> String {
    format!(
        r#"function riskyFunction{position}(input) {{
  if (typeof input !== 'string') {{
    throw new TypeError('Input must be a string');
  }}

  if (input.length === 0) {{
    throw new Error('Input cannot be empty');
  }}

  try {{
    const parsed = JSON.parse(input);
    return parsed;
  }} catch (e) {{
    console.warn('Failed to parse JSON:', e.message);
    return input;
  }}
}}

function unsafeFunction{position}() {{
  // This function has various issues
  var x = 1;
  var x = 2; // redeclaration

  for (var i = 0; i < 10; i++) {{
    setTimeout(() => {{
      console.log(i); // closure issue
    }}, 100);
  }}

  return x;
}}"#
    )
}

fn utility_functions(position: u64) -> String {
    format!(
        r#"function debounce{position}(func, wait) {{
  let timeout;
  return function executedFunction(...args) {{
    const later = () => {{
      clearTimeout(timeout);
      func(...args);
    }};

    clearTimeout(timeout);
    timeout = setTimeout(later, wait);
  }};
}}

function memoize{position}(fn) {{
  const cache = new Map();

  return function(...args) {{
    const key = JSON.stringify(args);

    if (cache.has(key)) {{
      return cache.get(key);
    }}

    const result = fn.apply(this, args);
    cache.set(key, result);
    return result;
  }};
}}

// Usage with some lint issues
const debouncedLog{position} = debounce{position}(console.log, 100);
const memoizedFib{position} = memoize{position}(function(n) {{
  if (n <= 1) return n;
  return memoizedFib{position}(n - 1) + memoizedFib{position}(n - 2);
}});"#
    )
}
