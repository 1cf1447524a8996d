/*!
Additional documentation.

# Components

These tables summarise the provided string components.  Prefixes are used in type aliases and debug output.

## Units

See the `encoding` module.

| Alias    | Unit    | Encoding |
| -------- | ------- | -------- |
| `WChar`  | `wchar_t` | Current C runtime wide character encoding.  UTF-16 on Windows, UTF-32 elsewhere. |
| (none)   | `u8`    | Narrow text, in whatever codepage it was converted to. |

## Allocators

See the `alloc` module.

| Prefix | Name     | Allocator |
| ------ | -------- | --------- |
| `C`    | `Malloc` | C runtime heap allocator (*i.e.* `calloc`/`free`) |
| `R`    | `Rust`   | Rust heap allocator. |

## Codepages

See `Codepage`.

| Number | Encoding |
| -----: | -------- |
| 0      | Current C runtime multibyte encoding (`CP_ACP`), via `mbrtowc`/`wcrtomb`. |
| 65001  | UTF-8 |
| 874, 1250-1258 | Windows single-byte codepages |
| 866, 20866, 21866, 10000, 10007 | IBM866, KOI8-R, KOI8-U, Mac Roman, Mac Cyrillic |
| 28592-28598, 28603, 28605 | ISO-8859-2 to -8, -13, -15 |
| 932, 936, 949, 950, 51932, 50220, 54936 | Shift_JIS, GBK, EUC-KR, Big5, EUC-JP, ISO-2022-JP, GB18030 |

# Common Misconceptions and Mistakes

* *"A zero-length buffer can hold an empty string."*  It can't; there is no room for the terminator.  Every function here that writes to a buffer either refuses a zero-length one or writes nothing to it.

* *"A truncation error means nothing was written."*  The opposite: `concat_into` and `copy_into` always write as much as fits, and *then* report the truncation.  Only a destination which is already full is left untouched.

* *"The C wide encoding is UTF-32."*  On Windows, it's UTF-16, and characters outside the BMP take two units.  The formatting functions never split such a pair across the end of a buffer.

* *"The C multibyte encoding is UTF-8."*  It merely *defaults* to UTF-8 on some systems.  `Codepage::ACP` depends on the current locale; use `Codepage::UTF8` if you mean UTF-8.

* *"Case-insensitive comparison understands the locale."*  `ends_with_ci` folds each unit on its own with simple lowercase mapping.  There is no locale, normalisation, or collation involved.
*/
