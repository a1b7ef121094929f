//! The keyword table.

/// Keyword category, deciding where a keyword may stand in for a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// May be used as any kind of name.
    Unreserved,
    /// May be a column name but not a function or type name.
    ColumnName,
    /// May be a function or type name but not a column name.
    TypeFuncName,
    /// Cannot be used as a name without quoting.
    Reserved,
}

/// All keywords recognized by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Abort,
    Absent,
    Absolute,
    Access,
    Action,
    Add,
    Admin,
    After,
    Aggregate,
    All,
    Also,
    Alter,
    Always,
    Analyse,
    Analyze,
    And,
    Any,
    Array,
    As,
    Asc,
    Asensitive,
    Assertion,
    Assignment,
    Asymmetric,
    At,
    Atomic,
    Attach,
    Attribute,
    Authorization,
    Backward,
    Before,
    Begin,
    Between,
    Bigint,
    Binary,
    Bit,
    Boolean,
    Both,
    Breadth,
    By,
    Cache,
    Call,
    Called,
    Cascade,
    Cascaded,
    Case,
    Cast,
    Catalog,
    Chain,
    Char,
    Character,
    Characteristics,
    Check,
    Checkpoint,
    Class,
    Close,
    Cluster,
    Coalesce,
    Collate,
    Collation,
    Column,
    Columns,
    Comment,
    Comments,
    Commit,
    Committed,
    Compression,
    Concurrently,
    Conditional,
    Configuration,
    Conflict,
    Connection,
    Constraint,
    Constraints,
    Content,
    Continue,
    Conversion,
    Copy,
    Cost,
    Create,
    Cross,
    Csv,
    Cube,
    Current,
    CurrentCatalog,
    CurrentDate,
    CurrentRole,
    CurrentSchema,
    CurrentTime,
    CurrentTimestamp,
    CurrentUser,
    Cursor,
    Cycle,
    Data,
    Database,
    Day,
    Deallocate,
    Dec,
    Decimal,
    Declare,
    Default,
    Defaults,
    Deferrable,
    Deferred,
    Definer,
    Delete,
    Delimiter,
    Delimiters,
    Depends,
    Depth,
    Desc,
    Detach,
    Dictionary,
    Disable,
    Discard,
    Distinct,
    Do,
    Document,
    Domain,
    Double,
    Drop,
    Each,
    Else,
    Empty,
    Enable,
    Encoding,
    Encrypted,
    End,
    Enum,
    Error,
    Escape,
    Event,
    Except,
    Exclude,
    Excluding,
    Exclusive,
    Execute,
    Exists,
    Explain,
    Expression,
    Extension,
    External,
    Extract,
    False,
    Family,
    Fetch,
    Filter,
    Finalize,
    First,
    Float,
    Following,
    For,
    Force,
    Foreign,
    Format,
    Forward,
    Freeze,
    From,
    Full,
    Function,
    Functions,
    Generated,
    Global,
    Grant,
    Granted,
    Greatest,
    Group,
    Grouping,
    Groups,
    Handler,
    Having,
    Header,
    Hold,
    Hour,
    Identity,
    If,
    Ilike,
    Immediate,
    Immutable,
    Implicit,
    Import,
    In,
    Include,
    Including,
    Increment,
    Indent,
    Index,
    Indexes,
    Inherit,
    Inherits,
    Initially,
    Inline,
    Inner,
    Inout,
    Input,
    Insensitive,
    Insert,
    Instead,
    Int,
    Integer,
    Intersect,
    Interval,
    Into,
    Invoker,
    Is,
    Isnull,
    Isolation,
    Join,
    Json,
    JsonArray,
    JsonArrayagg,
    JsonExists,
    JsonObject,
    JsonObjectagg,
    JsonQuery,
    JsonScalar,
    JsonSerialize,
    JsonTable,
    JsonValue,
    Keep,
    Key,
    Keys,
    Label,
    Language,
    Large,
    Last,
    Lateral,
    Leading,
    Leakproof,
    Least,
    Left,
    Level,
    Like,
    Limit,
    Listen,
    Load,
    Local,
    Localtime,
    Localtimestamp,
    Location,
    Lock,
    Locked,
    Logged,
    Mapping,
    Match,
    Matched,
    Materialized,
    Maxvalue,
    Merge,
    MergeAction,
    Method,
    Minute,
    Minvalue,
    Mode,
    Month,
    Move,
    Name,
    Names,
    National,
    Natural,
    Nchar,
    Nested,
    New,
    Next,
    Nfc,
    Nfd,
    Nfkc,
    Nfkd,
    No,
    None,
    Normalize,
    Normalized,
    Not,
    Nothing,
    Notify,
    Notnull,
    Nowait,
    Null,
    Nullif,
    Nulls,
    Numeric,
    Object,
    Of,
    Off,
    Offset,
    Oids,
    Old,
    Omit,
    On,
    Only,
    Operator,
    Option,
    Options,
    Or,
    Order,
    Ordinality,
    Others,
    Out,
    Outer,
    Over,
    Overlaps,
    Overlay,
    Overriding,
    Owned,
    Owner,
    Parallel,
    Parameter,
    Parser,
    Partial,
    Partition,
    Passing,
    Password,
    Path,
    Placing,
    Plans,
    Policy,
    Position,
    Preceding,
    Precision,
    Prepare,
    Prepared,
    Preserve,
    Primary,
    Prior,
    Privileges,
    Procedural,
    Procedure,
    Procedures,
    Program,
    Publication,
    Quote,
    Quotes,
    Range,
    Read,
    Real,
    Reassign,
    Recheck,
    Recursive,
    Ref,
    References,
    Referencing,
    Refresh,
    Reindex,
    Relative,
    Release,
    Rename,
    Repeatable,
    Replace,
    Replica,
    Reset,
    Restart,
    Restrict,
    Return,
    Returning,
    Returns,
    Revoke,
    Right,
    Role,
    Rollback,
    Rollup,
    Routine,
    Routines,
    Row,
    Rows,
    Rule,
    Savepoint,
    Scalar,
    Schema,
    Schemas,
    Scroll,
    Search,
    Second,
    Security,
    Select,
    Sequence,
    Sequences,
    Serializable,
    Server,
    Session,
    SessionUser,
    Set,
    Setof,
    Sets,
    Share,
    Show,
    Similar,
    Simple,
    Skip,
    Smallint,
    Snapshot,
    Some,
    Source,
    Sql,
    Stable,
    Standalone,
    Start,
    Statement,
    Statistics,
    Stdin,
    Stdout,
    Storage,
    Stored,
    Strict,
    String,
    Strip,
    Subscription,
    Substring,
    Support,
    Symmetric,
    Sysid,
    System,
    SystemUser,
    Table,
    Tables,
    Tablesample,
    Tablespace,
    Target,
    Temp,
    Template,
    Temporary,
    Text,
    Then,
    Ties,
    Time,
    Timestamp,
    To,
    Trailing,
    Transaction,
    Transform,
    Treat,
    Trigger,
    Trim,
    True,
    Truncate,
    Trusted,
    Type,
    Types,
    Uescape,
    Unbounded,
    Uncommitted,
    Unconditional,
    Unencrypted,
    Union,
    Unique,
    Unknown,
    Unlisten,
    Unlogged,
    Until,
    Update,
    User,
    Using,
    Vacuum,
    Valid,
    Validate,
    Validator,
    Value,
    Values,
    Varchar,
    Variadic,
    Varying,
    Verbose,
    Version,
    View,
    Views,
    Volatile,
    When,
    Where,
    Whitespace,
    Window,
    With,
    Within,
    Without,
    Work,
    Wrapper,
    Write,
    Xml,
    Xmlattributes,
    Xmlconcat,
    Xmlelement,
    Xmlexists,
    Xmlforest,
    Xmlnamespaces,
    Xmlparse,
    Xmlpi,
    Xmlroot,
    Xmlserialize,
    Xmltable,
    Year,
    Yes,
    Zone,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait, clippy::too_many_lines)]
    pub fn from_str(s: &str) -> Option<Self> {
        let keyword = match s.to_ascii_lowercase().as_str() {
            "abort" => Self::Abort,
            "absent" => Self::Absent,
            "absolute" => Self::Absolute,
            "access" => Self::Access,
            "action" => Self::Action,
            "add" => Self::Add,
            "admin" => Self::Admin,
            "after" => Self::After,
            "aggregate" => Self::Aggregate,
            "all" => Self::All,
            "also" => Self::Also,
            "alter" => Self::Alter,
            "always" => Self::Always,
            "analyse" => Self::Analyse,
            "analyze" => Self::Analyze,
            "and" => Self::And,
            "any" => Self::Any,
            "array" => Self::Array,
            "as" => Self::As,
            "asc" => Self::Asc,
            "asensitive" => Self::Asensitive,
            "assertion" => Self::Assertion,
            "assignment" => Self::Assignment,
            "asymmetric" => Self::Asymmetric,
            "at" => Self::At,
            "atomic" => Self::Atomic,
            "attach" => Self::Attach,
            "attribute" => Self::Attribute,
            "authorization" => Self::Authorization,
            "backward" => Self::Backward,
            "before" => Self::Before,
            "begin" => Self::Begin,
            "between" => Self::Between,
            "bigint" => Self::Bigint,
            "binary" => Self::Binary,
            "bit" => Self::Bit,
            "boolean" => Self::Boolean,
            "both" => Self::Both,
            "breadth" => Self::Breadth,
            "by" => Self::By,
            "cache" => Self::Cache,
            "call" => Self::Call,
            "called" => Self::Called,
            "cascade" => Self::Cascade,
            "cascaded" => Self::Cascaded,
            "case" => Self::Case,
            "cast" => Self::Cast,
            "catalog" => Self::Catalog,
            "chain" => Self::Chain,
            "char" => Self::Char,
            "character" => Self::Character,
            "characteristics" => Self::Characteristics,
            "check" => Self::Check,
            "checkpoint" => Self::Checkpoint,
            "class" => Self::Class,
            "close" => Self::Close,
            "cluster" => Self::Cluster,
            "coalesce" => Self::Coalesce,
            "collate" => Self::Collate,
            "collation" => Self::Collation,
            "column" => Self::Column,
            "columns" => Self::Columns,
            "comment" => Self::Comment,
            "comments" => Self::Comments,
            "commit" => Self::Commit,
            "committed" => Self::Committed,
            "compression" => Self::Compression,
            "concurrently" => Self::Concurrently,
            "conditional" => Self::Conditional,
            "configuration" => Self::Configuration,
            "conflict" => Self::Conflict,
            "connection" => Self::Connection,
            "constraint" => Self::Constraint,
            "constraints" => Self::Constraints,
            "content" => Self::Content,
            "continue" => Self::Continue,
            "conversion" => Self::Conversion,
            "copy" => Self::Copy,
            "cost" => Self::Cost,
            "create" => Self::Create,
            "cross" => Self::Cross,
            "csv" => Self::Csv,
            "cube" => Self::Cube,
            "current" => Self::Current,
            "current_catalog" => Self::CurrentCatalog,
            "current_date" => Self::CurrentDate,
            "current_role" => Self::CurrentRole,
            "current_schema" => Self::CurrentSchema,
            "current_time" => Self::CurrentTime,
            "current_timestamp" => Self::CurrentTimestamp,
            "current_user" => Self::CurrentUser,
            "cursor" => Self::Cursor,
            "cycle" => Self::Cycle,
            "data" => Self::Data,
            "database" => Self::Database,
            "day" => Self::Day,
            "deallocate" => Self::Deallocate,
            "dec" => Self::Dec,
            "decimal" => Self::Decimal,
            "declare" => Self::Declare,
            "default" => Self::Default,
            "defaults" => Self::Defaults,
            "deferrable" => Self::Deferrable,
            "deferred" => Self::Deferred,
            "definer" => Self::Definer,
            "delete" => Self::Delete,
            "delimiter" => Self::Delimiter,
            "delimiters" => Self::Delimiters,
            "depends" => Self::Depends,
            "depth" => Self::Depth,
            "desc" => Self::Desc,
            "detach" => Self::Detach,
            "dictionary" => Self::Dictionary,
            "disable" => Self::Disable,
            "discard" => Self::Discard,
            "distinct" => Self::Distinct,
            "do" => Self::Do,
            "document" => Self::Document,
            "domain" => Self::Domain,
            "double" => Self::Double,
            "drop" => Self::Drop,
            "each" => Self::Each,
            "else" => Self::Else,
            "empty" => Self::Empty,
            "enable" => Self::Enable,
            "encoding" => Self::Encoding,
            "encrypted" => Self::Encrypted,
            "end" => Self::End,
            "enum" => Self::Enum,
            "error" => Self::Error,
            "escape" => Self::Escape,
            "event" => Self::Event,
            "except" => Self::Except,
            "exclude" => Self::Exclude,
            "excluding" => Self::Excluding,
            "exclusive" => Self::Exclusive,
            "execute" => Self::Execute,
            "exists" => Self::Exists,
            "explain" => Self::Explain,
            "expression" => Self::Expression,
            "extension" => Self::Extension,
            "external" => Self::External,
            "extract" => Self::Extract,
            "false" => Self::False,
            "family" => Self::Family,
            "fetch" => Self::Fetch,
            "filter" => Self::Filter,
            "finalize" => Self::Finalize,
            "first" => Self::First,
            "float" => Self::Float,
            "following" => Self::Following,
            "for" => Self::For,
            "force" => Self::Force,
            "foreign" => Self::Foreign,
            "format" => Self::Format,
            "forward" => Self::Forward,
            "freeze" => Self::Freeze,
            "from" => Self::From,
            "full" => Self::Full,
            "function" => Self::Function,
            "functions" => Self::Functions,
            "generated" => Self::Generated,
            "global" => Self::Global,
            "grant" => Self::Grant,
            "granted" => Self::Granted,
            "greatest" => Self::Greatest,
            "group" => Self::Group,
            "grouping" => Self::Grouping,
            "groups" => Self::Groups,
            "handler" => Self::Handler,
            "having" => Self::Having,
            "header" => Self::Header,
            "hold" => Self::Hold,
            "hour" => Self::Hour,
            "identity" => Self::Identity,
            "if" => Self::If,
            "ilike" => Self::Ilike,
            "immediate" => Self::Immediate,
            "immutable" => Self::Immutable,
            "implicit" => Self::Implicit,
            "import" => Self::Import,
            "in" => Self::In,
            "include" => Self::Include,
            "including" => Self::Including,
            "increment" => Self::Increment,
            "indent" => Self::Indent,
            "index" => Self::Index,
            "indexes" => Self::Indexes,
            "inherit" => Self::Inherit,
            "inherits" => Self::Inherits,
            "initially" => Self::Initially,
            "inline" => Self::Inline,
            "inner" => Self::Inner,
            "inout" => Self::Inout,
            "input" => Self::Input,
            "insensitive" => Self::Insensitive,
            "insert" => Self::Insert,
            "instead" => Self::Instead,
            "int" => Self::Int,
            "integer" => Self::Integer,
            "intersect" => Self::Intersect,
            "interval" => Self::Interval,
            "into" => Self::Into,
            "invoker" => Self::Invoker,
            "is" => Self::Is,
            "isnull" => Self::Isnull,
            "isolation" => Self::Isolation,
            "join" => Self::Join,
            "json" => Self::Json,
            "json_array" => Self::JsonArray,
            "json_arrayagg" => Self::JsonArrayagg,
            "json_exists" => Self::JsonExists,
            "json_object" => Self::JsonObject,
            "json_objectagg" => Self::JsonObjectagg,
            "json_query" => Self::JsonQuery,
            "json_scalar" => Self::JsonScalar,
            "json_serialize" => Self::JsonSerialize,
            "json_table" => Self::JsonTable,
            "json_value" => Self::JsonValue,
            "keep" => Self::Keep,
            "key" => Self::Key,
            "keys" => Self::Keys,
            "label" => Self::Label,
            "language" => Self::Language,
            "large" => Self::Large,
            "last" => Self::Last,
            "lateral" => Self::Lateral,
            "leading" => Self::Leading,
            "leakproof" => Self::Leakproof,
            "least" => Self::Least,
            "left" => Self::Left,
            "level" => Self::Level,
            "like" => Self::Like,
            "limit" => Self::Limit,
            "listen" => Self::Listen,
            "load" => Self::Load,
            "local" => Self::Local,
            "localtime" => Self::Localtime,
            "localtimestamp" => Self::Localtimestamp,
            "location" => Self::Location,
            "lock" => Self::Lock,
            "locked" => Self::Locked,
            "logged" => Self::Logged,
            "mapping" => Self::Mapping,
            "match" => Self::Match,
            "matched" => Self::Matched,
            "materialized" => Self::Materialized,
            "maxvalue" => Self::Maxvalue,
            "merge" => Self::Merge,
            "merge_action" => Self::MergeAction,
            "method" => Self::Method,
            "minute" => Self::Minute,
            "minvalue" => Self::Minvalue,
            "mode" => Self::Mode,
            "month" => Self::Month,
            "move" => Self::Move,
            "name" => Self::Name,
            "names" => Self::Names,
            "national" => Self::National,
            "natural" => Self::Natural,
            "nchar" => Self::Nchar,
            "nested" => Self::Nested,
            "new" => Self::New,
            "next" => Self::Next,
            "nfc" => Self::Nfc,
            "nfd" => Self::Nfd,
            "nfkc" => Self::Nfkc,
            "nfkd" => Self::Nfkd,
            "no" => Self::No,
            "none" => Self::None,
            "normalize" => Self::Normalize,
            "normalized" => Self::Normalized,
            "not" => Self::Not,
            "nothing" => Self::Nothing,
            "notify" => Self::Notify,
            "notnull" => Self::Notnull,
            "nowait" => Self::Nowait,
            "null" => Self::Null,
            "nullif" => Self::Nullif,
            "nulls" => Self::Nulls,
            "numeric" => Self::Numeric,
            "object" => Self::Object,
            "of" => Self::Of,
            "off" => Self::Off,
            "offset" => Self::Offset,
            "oids" => Self::Oids,
            "old" => Self::Old,
            "omit" => Self::Omit,
            "on" => Self::On,
            "only" => Self::Only,
            "operator" => Self::Operator,
            "option" => Self::Option,
            "options" => Self::Options,
            "or" => Self::Or,
            "order" => Self::Order,
            "ordinality" => Self::Ordinality,
            "others" => Self::Others,
            "out" => Self::Out,
            "outer" => Self::Outer,
            "over" => Self::Over,
            "overlaps" => Self::Overlaps,
            "overlay" => Self::Overlay,
            "overriding" => Self::Overriding,
            "owned" => Self::Owned,
            "owner" => Self::Owner,
            "parallel" => Self::Parallel,
            "parameter" => Self::Parameter,
            "parser" => Self::Parser,
            "partial" => Self::Partial,
            "partition" => Self::Partition,
            "passing" => Self::Passing,
            "password" => Self::Password,
            "path" => Self::Path,
            "placing" => Self::Placing,
            "plans" => Self::Plans,
            "policy" => Self::Policy,
            "position" => Self::Position,
            "preceding" => Self::Preceding,
            "precision" => Self::Precision,
            "prepare" => Self::Prepare,
            "prepared" => Self::Prepared,
            "preserve" => Self::Preserve,
            "primary" => Self::Primary,
            "prior" => Self::Prior,
            "privileges" => Self::Privileges,
            "procedural" => Self::Procedural,
            "procedure" => Self::Procedure,
            "procedures" => Self::Procedures,
            "program" => Self::Program,
            "publication" => Self::Publication,
            "quote" => Self::Quote,
            "quotes" => Self::Quotes,
            "range" => Self::Range,
            "read" => Self::Read,
            "real" => Self::Real,
            "reassign" => Self::Reassign,
            "recheck" => Self::Recheck,
            "recursive" => Self::Recursive,
            "ref" => Self::Ref,
            "references" => Self::References,
            "referencing" => Self::Referencing,
            "refresh" => Self::Refresh,
            "reindex" => Self::Reindex,
            "relative" => Self::Relative,
            "release" => Self::Release,
            "rename" => Self::Rename,
            "repeatable" => Self::Repeatable,
            "replace" => Self::Replace,
            "replica" => Self::Replica,
            "reset" => Self::Reset,
            "restart" => Self::Restart,
            "restrict" => Self::Restrict,
            "return" => Self::Return,
            "returning" => Self::Returning,
            "returns" => Self::Returns,
            "revoke" => Self::Revoke,
            "right" => Self::Right,
            "role" => Self::Role,
            "rollback" => Self::Rollback,
            "rollup" => Self::Rollup,
            "routine" => Self::Routine,
            "routines" => Self::Routines,
            "row" => Self::Row,
            "rows" => Self::Rows,
            "rule" => Self::Rule,
            "savepoint" => Self::Savepoint,
            "scalar" => Self::Scalar,
            "schema" => Self::Schema,
            "schemas" => Self::Schemas,
            "scroll" => Self::Scroll,
            "search" => Self::Search,
            "second" => Self::Second,
            "security" => Self::Security,
            "select" => Self::Select,
            "sequence" => Self::Sequence,
            "sequences" => Self::Sequences,
            "serializable" => Self::Serializable,
            "server" => Self::Server,
            "session" => Self::Session,
            "session_user" => Self::SessionUser,
            "set" => Self::Set,
            "setof" => Self::Setof,
            "sets" => Self::Sets,
            "share" => Self::Share,
            "show" => Self::Show,
            "similar" => Self::Similar,
            "simple" => Self::Simple,
            "skip" => Self::Skip,
            "smallint" => Self::Smallint,
            "snapshot" => Self::Snapshot,
            "some" => Self::Some,
            "source" => Self::Source,
            "sql" => Self::Sql,
            "stable" => Self::Stable,
            "standalone" => Self::Standalone,
            "start" => Self::Start,
            "statement" => Self::Statement,
            "statistics" => Self::Statistics,
            "stdin" => Self::Stdin,
            "stdout" => Self::Stdout,
            "storage" => Self::Storage,
            "stored" => Self::Stored,
            "strict" => Self::Strict,
            "string" => Self::String,
            "strip" => Self::Strip,
            "subscription" => Self::Subscription,
            "substring" => Self::Substring,
            "support" => Self::Support,
            "symmetric" => Self::Symmetric,
            "sysid" => Self::Sysid,
            "system" => Self::System,
            "system_user" => Self::SystemUser,
            "table" => Self::Table,
            "tables" => Self::Tables,
            "tablesample" => Self::Tablesample,
            "tablespace" => Self::Tablespace,
            "target" => Self::Target,
            "temp" => Self::Temp,
            "template" => Self::Template,
            "temporary" => Self::Temporary,
            "text" => Self::Text,
            "then" => Self::Then,
            "ties" => Self::Ties,
            "time" => Self::Time,
            "timestamp" => Self::Timestamp,
            "to" => Self::To,
            "trailing" => Self::Trailing,
            "transaction" => Self::Transaction,
            "transform" => Self::Transform,
            "treat" => Self::Treat,
            "trigger" => Self::Trigger,
            "trim" => Self::Trim,
            "true" => Self::True,
            "truncate" => Self::Truncate,
            "trusted" => Self::Trusted,
            "type" => Self::Type,
            "types" => Self::Types,
            "uescape" => Self::Uescape,
            "unbounded" => Self::Unbounded,
            "uncommitted" => Self::Uncommitted,
            "unconditional" => Self::Unconditional,
            "unencrypted" => Self::Unencrypted,
            "union" => Self::Union,
            "unique" => Self::Unique,
            "unknown" => Self::Unknown,
            "unlisten" => Self::Unlisten,
            "unlogged" => Self::Unlogged,
            "until" => Self::Until,
            "update" => Self::Update,
            "user" => Self::User,
            "using" => Self::Using,
            "vacuum" => Self::Vacuum,
            "valid" => Self::Valid,
            "validate" => Self::Validate,
            "validator" => Self::Validator,
            "value" => Self::Value,
            "values" => Self::Values,
            "varchar" => Self::Varchar,
            "variadic" => Self::Variadic,
            "varying" => Self::Varying,
            "verbose" => Self::Verbose,
            "version" => Self::Version,
            "view" => Self::View,
            "views" => Self::Views,
            "volatile" => Self::Volatile,
            "when" => Self::When,
            "where" => Self::Where,
            "whitespace" => Self::Whitespace,
            "window" => Self::Window,
            "with" => Self::With,
            "within" => Self::Within,
            "without" => Self::Without,
            "work" => Self::Work,
            "wrapper" => Self::Wrapper,
            "write" => Self::Write,
            "xml" => Self::Xml,
            "xmlattributes" => Self::Xmlattributes,
            "xmlconcat" => Self::Xmlconcat,
            "xmlelement" => Self::Xmlelement,
            "xmlexists" => Self::Xmlexists,
            "xmlforest" => Self::Xmlforest,
            "xmlnamespaces" => Self::Xmlnamespaces,
            "xmlparse" => Self::Xmlparse,
            "xmlpi" => Self::Xmlpi,
            "xmlroot" => Self::Xmlroot,
            "xmlserialize" => Self::Xmlserialize,
            "xmltable" => Self::Xmltable,
            "year" => Self::Year,
            "yes" => Self::Yes,
            "zone" => Self::Zone,
            _ => return None,
        };
        Some(keyword)
    }

    /// Returns the lowercase text of the keyword.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Absent => "absent",
            Self::Absolute => "absolute",
            Self::Access => "access",
            Self::Action => "action",
            Self::Add => "add",
            Self::Admin => "admin",
            Self::After => "after",
            Self::Aggregate => "aggregate",
            Self::All => "all",
            Self::Also => "also",
            Self::Alter => "alter",
            Self::Always => "always",
            Self::Analyse => "analyse",
            Self::Analyze => "analyze",
            Self::And => "and",
            Self::Any => "any",
            Self::Array => "array",
            Self::As => "as",
            Self::Asc => "asc",
            Self::Asensitive => "asensitive",
            Self::Assertion => "assertion",
            Self::Assignment => "assignment",
            Self::Asymmetric => "asymmetric",
            Self::At => "at",
            Self::Atomic => "atomic",
            Self::Attach => "attach",
            Self::Attribute => "attribute",
            Self::Authorization => "authorization",
            Self::Backward => "backward",
            Self::Before => "before",
            Self::Begin => "begin",
            Self::Between => "between",
            Self::Bigint => "bigint",
            Self::Binary => "binary",
            Self::Bit => "bit",
            Self::Boolean => "boolean",
            Self::Both => "both",
            Self::Breadth => "breadth",
            Self::By => "by",
            Self::Cache => "cache",
            Self::Call => "call",
            Self::Called => "called",
            Self::Cascade => "cascade",
            Self::Cascaded => "cascaded",
            Self::Case => "case",
            Self::Cast => "cast",
            Self::Catalog => "catalog",
            Self::Chain => "chain",
            Self::Char => "char",
            Self::Character => "character",
            Self::Characteristics => "characteristics",
            Self::Check => "check",
            Self::Checkpoint => "checkpoint",
            Self::Class => "class",
            Self::Close => "close",
            Self::Cluster => "cluster",
            Self::Coalesce => "coalesce",
            Self::Collate => "collate",
            Self::Collation => "collation",
            Self::Column => "column",
            Self::Columns => "columns",
            Self::Comment => "comment",
            Self::Comments => "comments",
            Self::Commit => "commit",
            Self::Committed => "committed",
            Self::Compression => "compression",
            Self::Concurrently => "concurrently",
            Self::Conditional => "conditional",
            Self::Configuration => "configuration",
            Self::Conflict => "conflict",
            Self::Connection => "connection",
            Self::Constraint => "constraint",
            Self::Constraints => "constraints",
            Self::Content => "content",
            Self::Continue => "continue",
            Self::Conversion => "conversion",
            Self::Copy => "copy",
            Self::Cost => "cost",
            Self::Create => "create",
            Self::Cross => "cross",
            Self::Csv => "csv",
            Self::Cube => "cube",
            Self::Current => "current",
            Self::CurrentCatalog => "current_catalog",
            Self::CurrentDate => "current_date",
            Self::CurrentRole => "current_role",
            Self::CurrentSchema => "current_schema",
            Self::CurrentTime => "current_time",
            Self::CurrentTimestamp => "current_timestamp",
            Self::CurrentUser => "current_user",
            Self::Cursor => "cursor",
            Self::Cycle => "cycle",
            Self::Data => "data",
            Self::Database => "database",
            Self::Day => "day",
            Self::Deallocate => "deallocate",
            Self::Dec => "dec",
            Self::Decimal => "decimal",
            Self::Declare => "declare",
            Self::Default => "default",
            Self::Defaults => "defaults",
            Self::Deferrable => "deferrable",
            Self::Deferred => "deferred",
            Self::Definer => "definer",
            Self::Delete => "delete",
            Self::Delimiter => "delimiter",
            Self::Delimiters => "delimiters",
            Self::Depends => "depends",
            Self::Depth => "depth",
            Self::Desc => "desc",
            Self::Detach => "detach",
            Self::Dictionary => "dictionary",
            Self::Disable => "disable",
            Self::Discard => "discard",
            Self::Distinct => "distinct",
            Self::Do => "do",
            Self::Document => "document",
            Self::Domain => "domain",
            Self::Double => "double",
            Self::Drop => "drop",
            Self::Each => "each",
            Self::Else => "else",
            Self::Empty => "empty",
            Self::Enable => "enable",
            Self::Encoding => "encoding",
            Self::Encrypted => "encrypted",
            Self::End => "end",
            Self::Enum => "enum",
            Self::Error => "error",
            Self::Escape => "escape",
            Self::Event => "event",
            Self::Except => "except",
            Self::Exclude => "exclude",
            Self::Excluding => "excluding",
            Self::Exclusive => "exclusive",
            Self::Execute => "execute",
            Self::Exists => "exists",
            Self::Explain => "explain",
            Self::Expression => "expression",
            Self::Extension => "extension",
            Self::External => "external",
            Self::Extract => "extract",
            Self::False => "false",
            Self::Family => "family",
            Self::Fetch => "fetch",
            Self::Filter => "filter",
            Self::Finalize => "finalize",
            Self::First => "first",
            Self::Float => "float",
            Self::Following => "following",
            Self::For => "for",
            Self::Force => "force",
            Self::Foreign => "foreign",
            Self::Format => "format",
            Self::Forward => "forward",
            Self::Freeze => "freeze",
            Self::From => "from",
            Self::Full => "full",
            Self::Function => "function",
            Self::Functions => "functions",
            Self::Generated => "generated",
            Self::Global => "global",
            Self::Grant => "grant",
            Self::Granted => "granted",
            Self::Greatest => "greatest",
            Self::Group => "group",
            Self::Grouping => "grouping",
            Self::Groups => "groups",
            Self::Handler => "handler",
            Self::Having => "having",
            Self::Header => "header",
            Self::Hold => "hold",
            Self::Hour => "hour",
            Self::Identity => "identity",
            Self::If => "if",
            Self::Ilike => "ilike",
            Self::Immediate => "immediate",
            Self::Immutable => "immutable",
            Self::Implicit => "implicit",
            Self::Import => "import",
            Self::In => "in",
            Self::Include => "include",
            Self::Including => "including",
            Self::Increment => "increment",
            Self::Indent => "indent",
            Self::Index => "index",
            Self::Indexes => "indexes",
            Self::Inherit => "inherit",
            Self::Inherits => "inherits",
            Self::Initially => "initially",
            Self::Inline => "inline",
            Self::Inner => "inner",
            Self::Inout => "inout",
            Self::Input => "input",
            Self::Insensitive => "insensitive",
            Self::Insert => "insert",
            Self::Instead => "instead",
            Self::Int => "int",
            Self::Integer => "integer",
            Self::Intersect => "intersect",
            Self::Interval => "interval",
            Self::Into => "into",
            Self::Invoker => "invoker",
            Self::Is => "is",
            Self::Isnull => "isnull",
            Self::Isolation => "isolation",
            Self::Join => "join",
            Self::Json => "json",
            Self::JsonArray => "json_array",
            Self::JsonArrayagg => "json_arrayagg",
            Self::JsonExists => "json_exists",
            Self::JsonObject => "json_object",
            Self::JsonObjectagg => "json_objectagg",
            Self::JsonQuery => "json_query",
            Self::JsonScalar => "json_scalar",
            Self::JsonSerialize => "json_serialize",
            Self::JsonTable => "json_table",
            Self::JsonValue => "json_value",
            Self::Keep => "keep",
            Self::Key => "key",
            Self::Keys => "keys",
            Self::Label => "label",
            Self::Language => "language",
            Self::Large => "large",
            Self::Last => "last",
            Self::Lateral => "lateral",
            Self::Leading => "leading",
            Self::Leakproof => "leakproof",
            Self::Least => "least",
            Self::Left => "left",
            Self::Level => "level",
            Self::Like => "like",
            Self::Limit => "limit",
            Self::Listen => "listen",
            Self::Load => "load",
            Self::Local => "local",
            Self::Localtime => "localtime",
            Self::Localtimestamp => "localtimestamp",
            Self::Location => "location",
            Self::Lock => "lock",
            Self::Locked => "locked",
            Self::Logged => "logged",
            Self::Mapping => "mapping",
            Self::Match => "match",
            Self::Matched => "matched",
            Self::Materialized => "materialized",
            Self::Maxvalue => "maxvalue",
            Self::Merge => "merge",
            Self::MergeAction => "merge_action",
            Self::Method => "method",
            Self::Minute => "minute",
            Self::Minvalue => "minvalue",
            Self::Mode => "mode",
            Self::Month => "month",
            Self::Move => "move",
            Self::Name => "name",
            Self::Names => "names",
            Self::National => "national",
            Self::Natural => "natural",
            Self::Nchar => "nchar",
            Self::Nested => "nested",
            Self::New => "new",
            Self::Next => "next",
            Self::Nfc => "nfc",
            Self::Nfd => "nfd",
            Self::Nfkc => "nfkc",
            Self::Nfkd => "nfkd",
            Self::No => "no",
            Self::None => "none",
            Self::Normalize => "normalize",
            Self::Normalized => "normalized",
            Self::Not => "not",
            Self::Nothing => "nothing",
            Self::Notify => "notify",
            Self::Notnull => "notnull",
            Self::Nowait => "nowait",
            Self::Null => "null",
            Self::Nullif => "nullif",
            Self::Nulls => "nulls",
            Self::Numeric => "numeric",
            Self::Object => "object",
            Self::Of => "of",
            Self::Off => "off",
            Self::Offset => "offset",
            Self::Oids => "oids",
            Self::Old => "old",
            Self::Omit => "omit",
            Self::On => "on",
            Self::Only => "only",
            Self::Operator => "operator",
            Self::Option => "option",
            Self::Options => "options",
            Self::Or => "or",
            Self::Order => "order",
            Self::Ordinality => "ordinality",
            Self::Others => "others",
            Self::Out => "out",
            Self::Outer => "outer",
            Self::Over => "over",
            Self::Overlaps => "overlaps",
            Self::Overlay => "overlay",
            Self::Overriding => "overriding",
            Self::Owned => "owned",
            Self::Owner => "owner",
            Self::Parallel => "parallel",
            Self::Parameter => "parameter",
            Self::Parser => "parser",
            Self::Partial => "partial",
            Self::Partition => "partition",
            Self::Passing => "passing",
            Self::Password => "password",
            Self::Path => "path",
            Self::Placing => "placing",
            Self::Plans => "plans",
            Self::Policy => "policy",
            Self::Position => "position",
            Self::Preceding => "preceding",
            Self::Precision => "precision",
            Self::Prepare => "prepare",
            Self::Prepared => "prepared",
            Self::Preserve => "preserve",
            Self::Primary => "primary",
            Self::Prior => "prior",
            Self::Privileges => "privileges",
            Self::Procedural => "procedural",
            Self::Procedure => "procedure",
            Self::Procedures => "procedures",
            Self::Program => "program",
            Self::Publication => "publication",
            Self::Quote => "quote",
            Self::Quotes => "quotes",
            Self::Range => "range",
            Self::Read => "read",
            Self::Real => "real",
            Self::Reassign => "reassign",
            Self::Recheck => "recheck",
            Self::Recursive => "recursive",
            Self::Ref => "ref",
            Self::References => "references",
            Self::Referencing => "referencing",
            Self::Refresh => "refresh",
            Self::Reindex => "reindex",
            Self::Relative => "relative",
            Self::Release => "release",
            Self::Rename => "rename",
            Self::Repeatable => "repeatable",
            Self::Replace => "replace",
            Self::Replica => "replica",
            Self::Reset => "reset",
            Self::Restart => "restart",
            Self::Restrict => "restrict",
            Self::Return => "return",
            Self::Returning => "returning",
            Self::Returns => "returns",
            Self::Revoke => "revoke",
            Self::Right => "right",
            Self::Role => "role",
            Self::Rollback => "rollback",
            Self::Rollup => "rollup",
            Self::Routine => "routine",
            Self::Routines => "routines",
            Self::Row => "row",
            Self::Rows => "rows",
            Self::Rule => "rule",
            Self::Savepoint => "savepoint",
            Self::Scalar => "scalar",
            Self::Schema => "schema",
            Self::Schemas => "schemas",
            Self::Scroll => "scroll",
            Self::Search => "search",
            Self::Second => "second",
            Self::Security => "security",
            Self::Select => "select",
            Self::Sequence => "sequence",
            Self::Sequences => "sequences",
            Self::Serializable => "serializable",
            Self::Server => "server",
            Self::Session => "session",
            Self::SessionUser => "session_user",
            Self::Set => "set",
            Self::Setof => "setof",
            Self::Sets => "sets",
            Self::Share => "share",
            Self::Show => "show",
            Self::Similar => "similar",
            Self::Simple => "simple",
            Self::Skip => "skip",
            Self::Smallint => "smallint",
            Self::Snapshot => "snapshot",
            Self::Some => "some",
            Self::Source => "source",
            Self::Sql => "sql",
            Self::Stable => "stable",
            Self::Standalone => "standalone",
            Self::Start => "start",
            Self::Statement => "statement",
            Self::Statistics => "statistics",
            Self::Stdin => "stdin",
            Self::Stdout => "stdout",
            Self::Storage => "storage",
            Self::Stored => "stored",
            Self::Strict => "strict",
            Self::String => "string",
            Self::Strip => "strip",
            Self::Subscription => "subscription",
            Self::Substring => "substring",
            Self::Support => "support",
            Self::Symmetric => "symmetric",
            Self::Sysid => "sysid",
            Self::System => "system",
            Self::SystemUser => "system_user",
            Self::Table => "table",
            Self::Tables => "tables",
            Self::Tablesample => "tablesample",
            Self::Tablespace => "tablespace",
            Self::Target => "target",
            Self::Temp => "temp",
            Self::Template => "template",
            Self::Temporary => "temporary",
            Self::Text => "text",
            Self::Then => "then",
            Self::Ties => "ties",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::To => "to",
            Self::Trailing => "trailing",
            Self::Transaction => "transaction",
            Self::Transform => "transform",
            Self::Treat => "treat",
            Self::Trigger => "trigger",
            Self::Trim => "trim",
            Self::True => "true",
            Self::Truncate => "truncate",
            Self::Trusted => "trusted",
            Self::Type => "type",
            Self::Types => "types",
            Self::Uescape => "uescape",
            Self::Unbounded => "unbounded",
            Self::Uncommitted => "uncommitted",
            Self::Unconditional => "unconditional",
            Self::Unencrypted => "unencrypted",
            Self::Union => "union",
            Self::Unique => "unique",
            Self::Unknown => "unknown",
            Self::Unlisten => "unlisten",
            Self::Unlogged => "unlogged",
            Self::Until => "until",
            Self::Update => "update",
            Self::User => "user",
            Self::Using => "using",
            Self::Vacuum => "vacuum",
            Self::Valid => "valid",
            Self::Validate => "validate",
            Self::Validator => "validator",
            Self::Value => "value",
            Self::Values => "values",
            Self::Varchar => "varchar",
            Self::Variadic => "variadic",
            Self::Varying => "varying",
            Self::Verbose => "verbose",
            Self::Version => "version",
            Self::View => "view",
            Self::Views => "views",
            Self::Volatile => "volatile",
            Self::When => "when",
            Self::Where => "where",
            Self::Whitespace => "whitespace",
            Self::Window => "window",
            Self::With => "with",
            Self::Within => "within",
            Self::Without => "without",
            Self::Work => "work",
            Self::Wrapper => "wrapper",
            Self::Write => "write",
            Self::Xml => "xml",
            Self::Xmlattributes => "xmlattributes",
            Self::Xmlconcat => "xmlconcat",
            Self::Xmlelement => "xmlelement",
            Self::Xmlexists => "xmlexists",
            Self::Xmlforest => "xmlforest",
            Self::Xmlnamespaces => "xmlnamespaces",
            Self::Xmlparse => "xmlparse",
            Self::Xmlpi => "xmlpi",
            Self::Xmlroot => "xmlroot",
            Self::Xmlserialize => "xmlserialize",
            Self::Xmltable => "xmltable",
            Self::Year => "year",
            Self::Yes => "yes",
            Self::Zone => "zone",
        }
    }

    /// Returns the category of the keyword.
    #[must_use]
    pub const fn category(self) -> KeywordCategory {
        match self {
            Self::Between
            | Self::Bigint
            | Self::Bit
            | Self::Boolean
            | Self::Char
            | Self::Character
            | Self::Coalesce
            | Self::Dec
            | Self::Decimal
            | Self::Exists
            | Self::Extract
            | Self::Float
            | Self::Greatest
            | Self::Grouping
            | Self::Inout
            | Self::Int
            | Self::Integer
            | Self::Interval
            | Self::Json
            | Self::JsonArray
            | Self::JsonArrayagg
            | Self::JsonExists
            | Self::JsonObject
            | Self::JsonObjectagg
            | Self::JsonQuery
            | Self::JsonScalar
            | Self::JsonSerialize
            | Self::JsonTable
            | Self::JsonValue
            | Self::Least
            | Self::MergeAction
            | Self::National
            | Self::Nchar
            | Self::None
            | Self::Normalize
            | Self::Nullif
            | Self::Numeric
            | Self::Out
            | Self::Overlay
            | Self::Position
            | Self::Precision
            | Self::Real
            | Self::Row
            | Self::Setof
            | Self::Smallint
            | Self::Substring
            | Self::Time
            | Self::Timestamp
            | Self::Treat
            | Self::Trim
            | Self::Values
            | Self::Varchar
            | Self::Xmlattributes
            | Self::Xmlconcat
            | Self::Xmlelement
            | Self::Xmlexists
            | Self::Xmlforest
            | Self::Xmlnamespaces
            | Self::Xmlparse
            | Self::Xmlpi
            | Self::Xmlroot
            | Self::Xmlserialize
            | Self::Xmltable => KeywordCategory::ColumnName,
            Self::Authorization
            | Self::Binary
            | Self::Collation
            | Self::Concurrently
            | Self::Cross
            | Self::CurrentSchema
            | Self::Freeze
            | Self::Full
            | Self::Ilike
            | Self::Inner
            | Self::Is
            | Self::Isnull
            | Self::Join
            | Self::Left
            | Self::Like
            | Self::Natural
            | Self::Notnull
            | Self::Outer
            | Self::Overlaps
            | Self::Right
            | Self::Similar
            | Self::Tablesample
            | Self::Verbose => KeywordCategory::TypeFuncName,
            Self::All
            | Self::Analyse
            | Self::Analyze
            | Self::And
            | Self::Any
            | Self::Array
            | Self::As
            | Self::Asc
            | Self::Asymmetric
            | Self::Both
            | Self::Case
            | Self::Cast
            | Self::Check
            | Self::Collate
            | Self::Column
            | Self::Constraint
            | Self::Create
            | Self::CurrentCatalog
            | Self::CurrentDate
            | Self::CurrentRole
            | Self::CurrentTime
            | Self::CurrentTimestamp
            | Self::CurrentUser
            | Self::Default
            | Self::Deferrable
            | Self::Desc
            | Self::Distinct
            | Self::Do
            | Self::Else
            | Self::End
            | Self::Except
            | Self::False
            | Self::Fetch
            | Self::For
            | Self::Foreign
            | Self::From
            | Self::Grant
            | Self::Group
            | Self::Having
            | Self::In
            | Self::Initially
            | Self::Intersect
            | Self::Into
            | Self::Lateral
            | Self::Leading
            | Self::Limit
            | Self::Localtime
            | Self::Localtimestamp
            | Self::Not
            | Self::Null
            | Self::Offset
            | Self::On
            | Self::Only
            | Self::Or
            | Self::Order
            | Self::Placing
            | Self::Primary
            | Self::References
            | Self::Returning
            | Self::Select
            | Self::SessionUser
            | Self::Some
            | Self::Symmetric
            | Self::SystemUser
            | Self::Table
            | Self::Then
            | Self::To
            | Self::Trailing
            | Self::True
            | Self::Union
            | Self::Unique
            | Self::User
            | Self::Using
            | Self::Variadic
            | Self::When
            | Self::Where
            | Self::Window
            | Self::With => KeywordCategory::Reserved,
            _ => KeywordCategory::Unreserved,
        }
    }

    /// Returns true if the keyword may be used as a column label without `AS`.
    #[must_use]
    pub const fn is_bare_label(self) -> bool {
        !matches!(
            self,
            Self::Array
                | Self::As
                | Self::Char
                | Self::Character
                | Self::Create
                | Self::Day
                | Self::Except
                | Self::Fetch
                | Self::Filter
                | Self::For
                | Self::From
                | Self::Grant
                | Self::Group
                | Self::Having
                | Self::Hour
                | Self::Intersect
                | Self::Into
                | Self::Isnull
                | Self::Limit
                | Self::Minute
                | Self::Month
                | Self::Notnull
                | Self::Offset
                | Self::On
                | Self::Order
                | Self::Over
                | Self::Overlaps
                | Self::Precision
                | Self::Returning
                | Self::Second
                | Self::To
                | Self::Union
                | Self::Varying
                | Self::Where
                | Self::Window
                | Self::With
                | Self::Within
                | Self::Without
                | Self::Year
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("select"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::from_str("json_arrayagg"), Some(Keyword::JsonArrayagg));
        assert_eq!(Keyword::from_str("not_a_keyword"), None);
    }

    #[test]
    fn test_keyword_as_str() {
        assert_eq!(Keyword::CurrentTimestamp.as_str(), "current_timestamp");
        assert_eq!(Keyword::Between.to_string(), "between");
    }

    #[test]
    fn test_keyword_category() {
        assert_eq!(Keyword::Abort.category(), KeywordCategory::Unreserved);
        assert_eq!(Keyword::Between.category(), KeywordCategory::ColumnName);
        assert_eq!(Keyword::Left.category(), KeywordCategory::TypeFuncName);
        assert_eq!(Keyword::Select.category(), KeywordCategory::Reserved);
    }

    #[test]
    fn test_bare_label() {
        assert!(Keyword::Abort.is_bare_label());
        assert!(Keyword::Distinct.is_bare_label());
        assert!(!Keyword::From.is_bare_label());
        assert!(!Keyword::Over.is_bare_label());
    }
}
