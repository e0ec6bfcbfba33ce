//! Embedded Espressif Systems OUI assignments.
//!
//! One row per prefix: the hex-encoded prefix, a TAB, and the IEEE display form.

pub const ESPRESSIF_PREFIXES: &str = "\
782184\t78-21-84\n\
1097BD\t10-97-BD\n\
30C6F7\t30-C6-F7\n\
24D7EB\t24-D7-EB\n\
70B8F6\t70-B8-F6\n\
485519\t48-55-19\n\
E89F6D\tE8-9F-6D\n\
D4F98D\tD4-F9-8D\n\
4CEBD6\t4C-EB-D6\n\
349454\t34-94-54\n\
686725\t68-67-25\n\
58CF79\t58-CF-79\n\
1091A8\t10-91-A8\n\
90380C\t90-38-0C\n\
58BF25\t58-BF-25\n\
7C87CE\t7C-87-CE\n\
943CC6\t94-3C-C6\n\
6055F9\t60-55-F9\n\
409151\t40-91-51\n\
308398\t30-83-98\n\
1C9DC2\t1C-9D-C2\n\
AC0BFB\tAC-0B-FB\n\
84F703\t84-F7-03\n\
34865D\t34-86-5D\n\
78E36D\t78-E3-6D\n\
98CDAC\t98-CD-AC\n\
9C9C1F\t9C-9C-1F\n\
4C7525\t4C-75-25\n\
441793\t44-17-93\n\
EC94CB\tEC-94-CB\n\
A4E57C\tA4-E5-7C\n\
8C4B14\t8C-4B-14\n\
C8C9A3\tC8-C9-A3\n\
34B472\t34-B4-72\n\
A848FA\tA8-48-FA\n\
34AB95\t34-AB-95\n\
BCFF4D\tBC-FF-4D\n\
C45BBE\tC4-5B-BE\n\
545AA6\t54-5A-A6\n\
2C3AE8\t2C-3A-E8\n\
ECFABC\tEC-FA-BC\n\
DC4F22\tDC-4F-22\n\
B4E62D\tB4-E6-2D\n\
3C71BF\t3C-71-BF\n\
2CF432\t2C-F4-32\n\
4C11AE\t4C-11-AE\n\
B8F009\tB8-F0-09\n\
7C9EBD\t7C-9E-BD\n\
F008D1\tF0-08-D1\n\
483FDA\t48-3F-DA\n\
18FE34\t18-FE-34\n\
A47B9D\tA4-7B-9D\n\
84F3EB\t84-F3-EB\n\
840D8E\t84-0D-8E\n\
C82B96\tC8-2B-96\n\
84CCA8\t84-CC-A8\n\
40F520\t40-F5-20\n\
10521C\t10-52-1C\n\
F4CFA2\tF4-CF-A2\n\
E09806\tE0-98-06\n\
30AEA4\t30-AE-A4\n\
C44F33\tC4-4F-33\n\
D8F15B\tD8-F1-5B\n\
AC67B2\tAC-67-B2\n\
7CDFA1\t7C-DF-A1\n\
8CAAB5\t8C-AA-B5\n\
5CCF7F\t5C-CF-7F\n\
A020A6\tA0-20-A6\n\
24B2DE\t24-B2-DE\n\
D8A01D\tD8-A0-1D\n\
BCDDC2\tBC-DD-C2\n\
CC50E3\tCC-50-E3\n\
A4CF12\tA4-CF-12\n\
2462AB\t24-62-AB\n\
500291\t50-02-91\n\
D8BFC0\tD8-BF-C0\n\
98F4AB\t98-F4-AB\n\
70039F\t70-03-9F\n\
FCF5C4\tFC-F5-C4\n\
ACD074\tAC-D0-74\n\
9097D5\t90-97-D5\n\
600194\t60-01-94\n\
240AC4\t24-0A-C4\n\
68C63A\t68-C6-3A\n\
807D3A\t80-7D-3A\n\
246F28\t24-6F-28\n\
C4DD57\tC4-DD-57\n\
A8032A\tA8-03-2A\n\
24A160\t24-A1-60\n\
E8DB84\tE8-DB-84\n\
E868E7\tE8-68-E7\n\
94B97E\t94-B9-7E\n\
083AF2\t08-3A-F2\n\
E0E2E6\tE0-E2-E6\n\
A0764E\tA0-76-4E\n\
0CDC7E\t0C-DC-7E\n\
3C6105\t3C-61-05\n\
8CCE4E\t8C-CE-4E";
