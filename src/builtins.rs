//! Static registry of PHP built-in function names.
//!
//! Loaded once per process into a read-only set; safe to share across any
//! number of files analyzed in parallel. The list covers the commonly used
//! core extensions (string, array, math, variable handling, pcre, json,
//! hash, date/time, filesystem, output control). Names are stored
//! lowercase because PHP resolves function names case-insensitively.

use std::sync::LazyLock;

use rustc_hash::FxHashSet;

/// Embedded list of built-in function names, lowercase.
static BUILTIN_FUNCTIONS: &[&str] = &[
    // String functions
    "addcslashes", "addslashes", "bin2hex", "chop", "chr", "chunk_split",
    "convert_uuencode", "count_chars", "crc32", "explode", "fprintf",
    "hex2bin", "html_entity_decode", "htmlentities", "htmlspecialchars",
    "htmlspecialchars_decode", "implode", "join", "lcfirst", "levenshtein",
    "ltrim", "md5", "metaphone", "nl2br", "number_format", "ord", "parse_str",
    "printf", "quotemeta", "rtrim", "sha1", "similar_text", "soundex",
    "sprintf", "sscanf", "str_contains", "str_ends_with", "str_ireplace",
    "str_pad", "str_repeat", "str_replace", "str_split", "str_starts_with",
    "str_word_count", "strcasecmp", "strcmp", "strcoll", "strcspn",
    "strip_tags", "stripcslashes", "stripos", "stripslashes", "stristr",
    "strlen", "strnatcasecmp", "strnatcmp", "strncasecmp", "strncmp",
    "strpbrk", "strpos", "strrchr", "strrev", "strripos", "strrpos",
    "strspn", "strstr", "strtok", "strtolower", "strtoupper", "strtr",
    "substr", "substr_compare", "substr_count", "substr_replace", "trim",
    "ucfirst", "ucwords", "vsprintf", "wordwrap",
    // Array functions
    "array_change_key_case", "array_chunk", "array_column", "array_combine",
    "array_count_values", "array_diff", "array_diff_assoc", "array_diff_key",
    "array_fill", "array_fill_keys", "array_filter", "array_flip",
    "array_intersect", "array_intersect_assoc", "array_intersect_key",
    "array_is_list", "array_key_exists", "array_key_first", "array_key_last",
    "array_keys", "array_map", "array_merge", "array_merge_recursive",
    "array_pad", "array_pop", "array_product", "array_push", "array_rand",
    "array_reduce", "array_replace", "array_reverse", "array_search",
    "array_shift", "array_slice", "array_splice", "array_sum", "array_unique",
    "array_unshift", "array_values", "array_walk", "arsort", "asort",
    "compact", "count", "current", "end", "extract", "in_array", "key",
    "krsort", "ksort", "natcasesort", "natsort", "next", "prev", "range",
    "reset", "rsort", "shuffle", "sizeof", "sort", "uasort", "uksort",
    "usort",
    // Math functions
    "abs", "acos", "asin", "atan", "atan2", "base_convert", "bindec", "ceil",
    "cos", "decbin", "dechex", "decoct", "deg2rad", "exp", "floor", "fmod",
    "hexdec", "hypot", "intdiv", "log", "log10", "log2", "max", "min",
    "mt_rand", "mt_srand", "octdec", "pi", "pow", "rad2deg", "rand", "random_int",
    "round", "sin", "sqrt", "tan",
    // Variable handling
    "boolval", "doubleval", "floatval", "get_debug_type", "gettype",
    "intval", "is_array", "is_bool", "is_callable", "is_countable",
    "is_double", "is_float", "is_int", "is_integer", "is_iterable",
    "is_null", "is_numeric", "is_object", "is_scalar", "is_string",
    "print_r", "serialize", "settype", "strval", "unserialize",
    "var_dump", "var_export",
    // Function handling / misc core
    "call_user_func", "call_user_func_array", "constant", "define",
    "defined", "func_get_args", "func_num_args", "function_exists",
    "get_class", "get_object_vars", "method_exists", "property_exists",
    "spl_autoload_register", "spl_object_hash", "spl_object_id",
    "iterator_to_array", "usleep", "sleep", "uniqid", "error_log",
    "trigger_error", "assert", "filter_var",
    // PCRE
    "preg_grep", "preg_last_error", "preg_match", "preg_match_all",
    "preg_quote", "preg_replace", "preg_replace_callback", "preg_split",
    // JSON
    "json_decode", "json_encode", "json_last_error", "json_last_error_msg",
    // Hash
    "hash", "hash_algos", "hash_equals", "hash_file", "hash_hmac",
    "password_hash", "password_verify",
    // Date/time
    "checkdate", "date", "date_create", "date_default_timezone_get",
    "date_default_timezone_set", "gmdate", "gmmktime", "microtime",
    "mktime", "strtotime", "time",
    // Filesystem
    "basename", "chmod", "copy", "dirname", "fclose", "feof", "fgets",
    "file", "file_exists", "file_get_contents", "file_put_contents",
    "fileatime", "filemtime", "filesize", "fopen", "fread", "fwrite",
    "glob", "is_dir", "is_file", "is_readable", "is_writable", "mkdir",
    "pathinfo", "realpath", "rename", "rmdir", "scandir", "tempnam",
    "tmpfile", "touch", "unlink",
    // URLs and encoding
    "base64_decode", "base64_encode", "http_build_query", "parse_url",
    "rawurldecode", "rawurlencode", "urldecode", "urlencode",
    // Output control
    "flush", "ob_end_clean", "ob_end_flush", "ob_get_clean",
    "ob_get_contents", "ob_start",
    // Multibyte string (commonly available)
    "mb_convert_case", "mb_internal_encoding", "mb_strlen", "mb_strpos",
    "mb_strtolower", "mb_strtoupper", "mb_substr",
];

static BUILTIN_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| BUILTIN_FUNCTIONS.iter().copied().collect());

/// Whether `name` (lowercase) is a known built-in function.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_SET.contains(name)
}

/// The full set of known built-in names.
pub fn all() -> &'static FxHashSet<&'static str> {
    &BUILTIN_SET
}
